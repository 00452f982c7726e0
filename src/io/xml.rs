// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XML persistence for vertices, faces and point lists
//!
//! Vectors are written as attributes (`<coords x="0" y="1" z="2"/>`), the
//! transform as four `rowN` elements. The vertex normal is optional: it is
//! omitted while unset and read back as unset when absent. Discarded
//! vertices are written with NaN fields, and a vertex whose coords are all
//! NaN is read back as discarded.

use crate::error::{GeometryError, Result};
use crate::geometry::{ControlPoint, Face, Geometry, PointListGeometry, Vertex};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct XmlVec3 {
    #[serde(rename = "@x")]
    x: f64,
    #[serde(rename = "@y")]
    y: f64,
    #[serde(rename = "@z")]
    z: f64,
}

impl XmlVec3 {
    fn nan() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
            z: f64::NAN,
        }
    }

    fn is_nan(&self) -> bool {
        self.x.is_nan() && self.y.is_nan() && self.z.is_nan()
    }
}

impl From<Vector3<f64>> for XmlVec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<XmlVec3> for Vector3<f64> {
    fn from(v: XmlVec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct XmlVec4 {
    #[serde(rename = "@x")]
    x: f64,
    #[serde(rename = "@y")]
    y: f64,
    #[serde(rename = "@z")]
    z: f64,
    #[serde(rename = "@w")]
    w: f64,
}

impl From<Vector4<f64>> for XmlVec4 {
    fn from(v: Vector4<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: v.w,
        }
    }
}

impl From<XmlVec4> for Vector4<f64> {
    fn from(v: XmlVec4) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct XmlMatrix {
    row0: XmlVec4,
    row1: XmlVec4,
    row2: XmlVec4,
    row3: XmlVec4,
}

impl Default for XmlMatrix {
    fn default() -> Self {
        Matrix4::identity().into()
    }
}

impl From<Matrix4<f64>> for XmlMatrix {
    fn from(m: Matrix4<f64>) -> Self {
        let row = |i: usize| XmlVec4::from(m.row(i).transpose());
        Self {
            row0: row(0),
            row1: row(1),
            row2: row(2),
            row3: row(3),
        }
    }
}

impl From<XmlMatrix> for Matrix4<f64> {
    fn from(m: XmlMatrix) -> Self {
        Matrix4::from_rows(&[
            Vector4::from(m.row0).transpose(),
            Vector4::from(m.row1).transpose(),
            Vector4::from(m.row2).transpose(),
            Vector4::from(m.row3).transpose(),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Vertex")]
struct XmlVertex {
    coords: XmlVec3,
    texcoords: XmlVec3,
    color: XmlVec4,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<XmlVec3>,
}

impl From<&Vertex> for XmlVertex {
    fn from(v: &Vertex) -> Self {
        if v.is_discarded() {
            return Self {
                coords: XmlVec3::nan(),
                texcoords: XmlVec3::nan(),
                color: Vector4::repeat(f64::NAN).into(),
                normal: None,
            };
        }
        Self {
            coords: v.coords.coords.into(),
            texcoords: v.texcoords.into(),
            color: v.color.into(),
            normal: v.try_normal().map(|n| (*n).into()),
        }
    }
}

impl From<XmlVertex> for Vertex {
    fn from(v: XmlVertex) -> Self {
        let discarded = v.coords.is_nan();
        let mut vertex = Vertex::new(
            Point3::from(Vector3::from(v.coords)),
            v.texcoords.into(),
            v.color.into(),
        );
        if discarded {
            return vertex.discarded();
        }
        if let Some(normal) = v.normal {
            vertex.set_normal(normal.into());
        }
        vertex
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Face")]
struct XmlFace {
    #[serde(default)]
    transformation: XmlMatrix,
    #[serde(default, rename = "vertex")]
    vertices: Vec<XmlVertex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<XmlVec3>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct XmlPoint {
    #[serde(rename = "@x", default, skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(rename = "@y", default, skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(rename = "@z", default, skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
    #[serde(rename = "@w", default, skip_serializing_if = "Option::is_none")]
    w: Option<f64>,
}

impl XmlPoint {
    fn from_components(components: &[f64]) -> Self {
        let mut values = components.iter().copied();
        Self {
            x: values.next(),
            y: values.next(),
            z: values.next(),
            w: values.next(),
        }
    }

    fn components(&self) -> Vec<f64> {
        [self.x, self.y, self.z, self.w].into_iter().flatten().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "PointList")]
struct XmlPointList {
    #[serde(default)]
    transformation: XmlMatrix,
    #[serde(default, rename = "point")]
    points: Vec<XmlPoint>,
}

fn write<T: Serialize>(value: &T) -> Result<String> {
    quick_xml::se::to_string(value).map_err(|e| GeometryError::Serialization(e.to_string()))
}

fn read<T: for<'de> Deserialize<'de>>(xml: &str) -> Result<T> {
    quick_xml::de::from_str(xml).map_err(|e| GeometryError::Deserialization(e.to_string()))
}

pub fn vertex_to_xml(vertex: &Vertex) -> Result<String> {
    write(&XmlVertex::from(vertex))
}

pub fn vertex_from_xml(xml: &str) -> Result<Vertex> {
    read::<XmlVertex>(xml).map(Vertex::from)
}

pub fn face_to_xml(face: &Face) -> Result<String> {
    write(&XmlFace {
        transformation: face.transformation_matrix().into(),
        vertices: face.iter().map(XmlVertex::from).collect(),
        normal: face.try_normal().map(|n| (*n).into()),
    })
}

pub fn face_from_xml(xml: &str) -> Result<Face> {
    let parsed: XmlFace = read(xml)?;
    let mut face: Face = parsed.vertices.into_iter().map(Vertex::from).collect();
    face.set_transformation_matrix(parsed.transformation.into());
    if let Some(normal) = parsed.normal {
        face.set_normal(normal.into());
    }
    Ok(face)
}

pub fn point_list_to_xml<T: ControlPoint>(list: &PointListGeometry<T>) -> Result<String> {
    let components = list.iter().map(|p| p.components()).collect::<Vec<_>>();
    if let Some(wide) = components.iter().find(|c| c.len() > 4) {
        return Err(GeometryError::Serialization(format!(
            "points with {} components cannot be written as attributes",
            wide.len()
        )));
    }
    write(&XmlPointList {
        transformation: list.geometry_base().transformation_matrix.into(),
        points: components
            .into_iter()
            .map(XmlPoint::from_components)
            .collect(),
    })
}

pub fn point_list_from_xml<T: ControlPoint>(xml: &str) -> Result<PointListGeometry<T>> {
    let parsed: XmlPointList = read(xml)?;
    let points = parsed
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            T::from_components(&point.components()).ok_or_else(|| {
                GeometryError::Deserialization(format!("point {i} has the wrong number of components"))
            })
        })
        .collect::<Result<Vec<T>>>()?;

    let mut list = PointListGeometry::from_points(points);
    list.geometry_base_mut().transformation_matrix = parsed.transformation.into();
    Ok(list)
}
