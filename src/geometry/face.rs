// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex planar polygon and its clipping against a plane

use super::{BoundingBox, Geometry, GeometryBase, Plane, Vertex};
use crate::error::{check_epsilon, GeometryError, Result};
use crate::io::xml;
use log::trace;
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Ordered, implicitly closed polygon of vertices
///
/// Vertices are expected to be coplanar and convex, wound counter-clockwise
/// when seen from the front. Neither property is checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Face {
    #[serde(default)]
    base: GeometryBase,
    vertices: Vec<Vertex>,
    /// Flat-shading normal, independent of the per-vertex normals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<Vector3<f64>>,
}

impl Face {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn remove_last(&mut self) -> Option<Vertex> {
        self.vertices.pop()
    }

    /// Remove all vertices and the face normal
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normal = None;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn has_normal(&self) -> bool {
        self.normal.is_some()
    }

    pub fn normal(&self) -> Result<Vector3<f64>> {
        self.normal
            .ok_or_else(|| GeometryError::PreconditionFailed("face normal is not set".into()))
    }

    pub fn try_normal(&self) -> Option<&Vector3<f64>> {
        self.normal.as_ref()
    }

    pub fn set_normal(&mut self, normal: Vector3<f64>) {
        self.normal = Some(normal);
    }

    pub fn clear_normal(&mut self) {
        self.normal = None;
    }

    /// Unit normal from the vertex positions (Newell's method)
    pub fn compute_normal(&self) -> Option<Vector3<f64>> {
        if self.vertices.len() < 3 {
            return None;
        }
        let mut normal = Vector3::<f64>::zeros();
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];
            let (a, b) = (current.coords, next.coords);
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        let length = normal.norm();
        (length > 1e-12).then(|| normal / length)
    }

    /// Only compares vertex counts; see [`Face::equals_face`] for a full comparison
    pub fn same_vertex_count(&self, other: &Face) -> bool {
        self.vertices.len() == other.vertices.len()
    }

    /// Same vertex count and every vertex pair equal within `epsilon`, in order
    pub fn equals_face(&self, other: &Face, epsilon: f64) -> bool {
        self.same_vertex_count(other)
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.equals(b, epsilon))
    }

    /// Apply the stored transform to every vertex and reset it to identity
    pub fn bake_transform(&mut self) {
        if self.base.is_identity() {
            return;
        }
        let matrix = self.base.transformation_matrix;
        for vertex in &mut self.vertices {
            vertex.transform(&matrix);
        }
        self.base.transformation_matrix = Matrix4::identity();
    }

    /// Clip against `plane`, keeping the part with `distance <= 0`.
    ///
    /// The plane must be given in the same space as the vertices. Only the
    /// original vertices take part in the edge tests; the clipped polygon is
    /// appended behind them and the originals are dropped at the end.
    /// Intersections within `epsilon` of an edge endpoint are not inserted.
    pub fn clip_polygon(&mut self, plane: &Plane, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        if self.vertices.len() < 2 {
            return Ok(());
        }

        let vertex_count = self.vertices.len();
        let last = vertex_count - 1;
        let mut last_distance = self.vertices[0].distance_to_plane(plane, epsilon);

        for i in 0..vertex_count {
            let next = (i + 1) % vertex_count;
            let distance = self.vertices[next].distance_to_plane(plane, epsilon);

            if last_distance <= 0.0 && distance <= 0.0 {
                // edge fully kept
                if i == 0 {
                    self.vertices.push(self.vertices[i]);
                }
                if i != last {
                    self.vertices.push(self.vertices[next]);
                }
            } else if last_distance <= 0.0 && distance > 0.0 {
                // leaving the kept half-space
                if i == 0 {
                    self.vertices.push(self.vertices[i]);
                }
                let t = last_distance / (last_distance - distance);
                let hit = self.vertices[i].interpolate(&self.vertices[next], t);
                if hit.distance(&self.vertices[i]) > epsilon {
                    self.vertices.push(hit);
                }
            } else if last_distance > 0.0 && distance <= 0.0 {
                // entering the kept half-space
                let t = last_distance / (last_distance - distance);
                let hit = self.vertices[i].interpolate(&self.vertices[next], t);
                if hit.distance(&self.vertices[next]) > epsilon {
                    self.vertices.push(hit);
                }
                if i != last {
                    self.vertices.push(self.vertices[next]);
                }
            }

            last_distance = distance;
        }

        self.vertices.drain(..vertex_count);
        trace!(
            "clipped face: {} -> {} vertices",
            vertex_count,
            self.vertices.len()
        );
        Ok(())
    }
}

impl Geometry for Face {
    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clip(&mut self, plane: &Plane, epsilon: f64) -> Result<()> {
        self.clip_polygon(plane, epsilon)
    }

    /// Union of the vertex positions; the stored transform is not applied
    fn bounding_box(&self, _transformed: bool) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for vertex in &self.vertices {
            bbox.union(&vertex.bounding_box());
        }
        bbox
    }

    fn to_xml(&self) -> Result<String> {
        xml::face_to_xml(self)
    }

    fn equals(&self, other: &dyn Geometry, epsilon: f64) -> bool {
        other
            .as_any()
            .downcast_ref::<Face>()
            .is_some_and(|face| self.equals_face(face, epsilon))
    }
}

impl FromIterator<Vertex> for Face {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self::from_vertices(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Face {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
