// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Attributed vertex: position, texture coordinates, color and optional normal

use super::{BoundingBox, Plane};
use crate::error::{check_epsilon, GeometryError, Result};
use crate::utils::math::{lerp, snap_to_zero};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Whether a vertex survived the last vertex-level clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexState {
    #[default]
    Active,
    /// Clipped away; the vertex is logically absent but keeps its slot
    Discarded,
}

/// Vertex with position, texture coordinates, RGBA color and optional normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub coords: Point3<f64>,
    pub texcoords: Vector3<f64>,
    pub color: Vector4<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normal: Option<Vector3<f64>>,
    #[serde(default)]
    state: VertexState,
}

impl Vertex {
    pub fn new(coords: Point3<f64>, texcoords: Vector3<f64>, color: Vector4<f64>) -> Self {
        Self {
            coords,
            texcoords,
            color,
            normal: None,
            state: VertexState::Active,
        }
    }

    pub fn with_normal(
        coords: Point3<f64>,
        texcoords: Vector3<f64>,
        color: Vector4<f64>,
        normal: Vector3<f64>,
    ) -> Self {
        Self {
            normal: Some(normal),
            ..Self::new(coords, texcoords, color)
        }
    }

    /// Vertex carrying only a position; texcoords zero, color opaque white
    pub fn at(coords: Point3<f64>) -> Self {
        Self::new(coords, Vector3::zeros(), Vector4::new(1.0, 1.0, 1.0, 1.0))
    }

    pub fn state(&self) -> VertexState {
        self.state
    }

    pub fn is_discarded(&self) -> bool {
        self.state == VertexState::Discarded
    }

    pub(crate) fn discarded(mut self) -> Self {
        self.state = VertexState::Discarded;
        self.normal = None;
        self
    }

    pub fn has_normal(&self) -> bool {
        self.normal.is_some()
    }

    /// The normal; reading it while unset is a caller error
    pub fn normal(&self) -> Result<Vector3<f64>> {
        self.normal
            .ok_or_else(|| GeometryError::PreconditionFailed("vertex normal is not set".into()))
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

    /// Signed distance `dot(n, coords) - c`, snapped to `0` within `epsilon`.
    ///
    /// Snapping keeps vertices lying almost on the plane from producing
    /// sliver polygons during clipping.
    pub fn distance_to_plane(&self, plane: &Plane, epsilon: f64) -> f64 {
        snap_to_zero(plane.signed_distance(&self.coords), epsilon)
    }

    /// Euclidean distance between positions
    pub fn distance(&self, other: &Vertex) -> f64 {
        nalgebra::distance(&self.coords, &other.coords)
    }

    /// `a + (b - a) * t` for every attribute; `t` is not clamped.
    ///
    /// Normals are blended only when both vertices define one. A discarded
    /// operand yields a discarded result.
    pub fn interpolate(&self, other: &Vertex, t: f64) -> Vertex {
        let normal = match (self.normal, other.normal) {
            (Some(a), Some(b)) => Some(lerp(a, b, t)),
            _ => None,
        };
        let result = Vertex {
            coords: Point3::from(lerp(self.coords.coords, other.coords.coords, t)),
            texcoords: lerp(self.texcoords, other.texcoords, t),
            color: lerp(self.color, other.color, t),
            normal,
            state: VertexState::Active,
        };
        if self.is_discarded() || other.is_discarded() {
            result.discarded()
        } else {
            result
        }
    }

    /// Midpoint of two vertices
    pub fn combine(&self, other: &Vertex) -> Vertex {
        self.interpolate(other, 0.5)
    }

    /// Mark the vertex discarded if it lies strictly on the positive side of the plane
    pub fn clip(&mut self, plane: &Plane, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        if self.distance_to_plane(plane, epsilon) > 0.0 {
            *self = self.discarded();
        }
        Ok(())
    }

    /// Tolerance comparison of all attributes.
    ///
    /// Positions must be within `epsilon`; texcoords, color and normals must
    /// differ by at most `epsilon` in squared length. Two discarded vertices
    /// are equal; a discarded vertex never equals an active one.
    pub fn equals(&self, other: &Vertex, epsilon: f64) -> bool {
        match (self.is_discarded(), other.is_discarded()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        if self.distance(other) > epsilon {
            return false;
        }
        if (self.texcoords - other.texcoords).norm_squared() > epsilon {
            return false;
        }
        if (self.color - other.color).norm_squared() > epsilon {
            return false;
        }

        match (&self.normal, &other.normal) {
            (None, None) => true,
            (Some(a), Some(b)) => (a - b).norm_squared() <= epsilon,
            _ => false,
        }
    }

    /// Zero-volume box at the position; undefined for a discarded vertex
    pub fn bounding_box(&self) -> BoundingBox {
        if self.is_discarded() {
            return BoundingBox::empty();
        }
        BoundingBox::from_point(&self.coords)
    }

    /// Apply a transform to the position and its inverse transpose to the normal.
    ///
    /// A singular `matrix` has no inverse transpose; the normal is then mapped
    /// by `matrix` itself and renormalized, without reporting an error.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        self.coords = matrix.transform_point(&self.coords);
        if let Some(normal) = self.normal {
            let normal_matrix = matrix
                .try_inverse()
                .map(|m| m.transpose())
                .unwrap_or(*matrix);
            let transformed = normal_matrix.transform_vector(&normal);
            let length = transformed.norm();
            self.normal = Some(if length > 0.0 {
                transformed / length
            } else {
                transformed
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(
            Point3::new(x, y, z),
            Vector3::new(x, y, z),
            Vector4::new(x, y, z, 1.0),
        )
    }

    #[test]
    fn test_distance() {
        assert_eq!(vertex(0.0, 0.0, 0.0).distance(&vertex(3.0, 4.0, 0.0)), 5.0);
    }

    #[test]
    fn test_distance_to_plane_snaps() {
        let plane = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0);
        let v = vertex(0.0, 0.0, 1.0 + 1e-7);
        assert_eq!(v.distance_to_plane(&plane, 1e-6), 0.0);
        assert_relative_eq!(v.distance_to_plane(&plane, 0.0), 1e-7, epsilon = 1e-12);
        assert_relative_eq!(vertex(0.0, 0.0, 3.0).distance_to_plane(&plane, 1e-6), 2.0);
    }

    #[test]
    fn test_normal_precondition() {
        let mut v = vertex(1.0, 2.0, 3.0);
        assert!(matches!(v.normal(), Err(GeometryError::PreconditionFailed(_))));
        v.set_normal(Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(v.normal().unwrap(), Vector3::new(0.0, 0.0, 1.0));
        v.clear_normal();
        assert!(v.try_normal().is_none());
    }

    #[test]
    fn test_interpolate_extrapolates() {
        let a = vertex(0.0, 0.0, 0.0);
        let b = vertex(1.0, 2.0, 3.0);
        let mid = a.combine(&b);
        assert_relative_eq!(mid.coords, Point3::new(0.5, 1.0, 1.5));
        assert_relative_eq!(mid.color, Vector4::new(0.5, 1.0, 1.5, 1.0));

        let beyond = a.interpolate(&b, 2.0);
        assert_relative_eq!(beyond.coords, Point3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_interpolate_normals_only_when_both_set() {
        let n = Vector3::new(0.0, 0.0, 1.0);
        let a = Vertex::with_normal(Point3::origin(), Vector3::zeros(), Vector4::zeros(), n);
        let b = Vertex::with_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector4::zeros(),
            Vector3::new(0.0, 1.0, 0.0),
        );
        let c = vertex(1.0, 1.0, 1.0);

        assert_relative_eq!(a.combine(&b).normal().unwrap(), Vector3::new(0.0, 0.5, 0.5));
        assert!(!a.combine(&c).has_normal());
    }

    #[test]
    fn test_clip_marks_discarded() {
        let plane = Plane::new(Vector3::new(1.0, 0.0, 0.0), 0.0);
        let mut kept = vertex(-1.0, 0.0, 0.0);
        kept.clip(&plane, 1e-6).unwrap();
        assert_eq!(kept.state(), VertexState::Active);

        let mut on_plane = vertex(1e-8, 0.0, 0.0);
        on_plane.clip(&plane, 1e-6).unwrap();
        assert!(!on_plane.is_discarded());

        let mut dropped = Vertex::with_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector4::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
        );
        dropped.clip(&plane, 1e-6).unwrap();
        assert!(dropped.is_discarded());
        assert!(!dropped.has_normal());
        assert!(!dropped.bounding_box().is_defined());

        assert!(dropped.clip(&plane, -1.0).is_err());
    }

    #[test]
    fn test_equals() {
        let a = vertex(1.0, 2.0, 3.0);
        let mut b = a;
        b.coords.x += 1e-7;
        assert!(a.equals(&a, 1e-5));
        assert!(a.equals(&b, 1e-5));
        assert!(b.equals(&a, 1e-5));

        let mut c = a;
        c.color.w = 0.5;
        assert!(!a.equals(&c, 1e-5));

        let mut d = a;
        d.set_normal(Vector3::new(0.0, 1.0, 0.0));
        assert!(!a.equals(&d, 1e-5));
        assert!(!d.equals(&a, 1e-5));
    }

    #[test]
    fn test_equals_discarded() {
        let a = vertex(1.0, 2.0, 3.0).discarded();
        let b = vertex(-4.0, 0.0, 1.0).discarded();
        assert!(a.equals(&b, 1e-5));
        assert!(!a.equals(&vertex(1.0, 2.0, 3.0), 1e-5));
        assert!(a.interpolate(&vertex(0.0, 0.0, 0.0), 0.5).is_discarded());
    }

    #[test]
    fn test_transform() {
        let mut v = Vertex::with_normal(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector4::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
        );
        v.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0)));
        assert_relative_eq!(v.coords, Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(v.normal().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_singular_keeps_going() {
        let mut v = Vertex::with_normal(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::zeros(),
            Vector4::zeros(),
            Vector3::new(1.0, 1.0, 0.0),
        );
        v.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 0.0, 1.0)));
        assert_eq!(v.coords, Point3::new(1.0, 0.0, 3.0));
        assert_relative_eq!(v.normal().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = vertex(1.0, 2.0, 3.0).bounding_box();
        assert_eq!(bbox.min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
    }
}
