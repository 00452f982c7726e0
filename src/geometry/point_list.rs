// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Transform-aware list of points, generic over the point type

use super::{BoundingBox, ControlPoint, Geometry, GeometryBase, Plane, SpatialPoint};
use crate::error::{check_epsilon, Result};
use crate::io::xml;
use log::trace;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Ordered points of type `T` plus a model transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointListGeometry<T> {
    #[serde(default)]
    base: GeometryBase,
    points: Vec<T>,
}

pub type PointListGeometryVec2 = PointListGeometry<Vector2<f64>>;
pub type PointListGeometryVec3 = PointListGeometry<Vector3<f64>>;

impl<T: ControlPoint> PointListGeometry<T> {
    pub fn new() -> Self {
        Self {
            base: GeometryBase::new(),
            points: Vec::new(),
        }
    }

    pub fn from_points(points: Vec<T>) -> Self {
        Self {
            base: GeometryBase::new(),
            points,
        }
    }

    pub fn add_point(&mut self, point: T) {
        self.points.push(point);
    }

    pub fn point(&self, index: usize) -> Option<&T> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[T] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<T>) {
        self.points = points;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }

    /// Transform state, available for every point type
    pub fn geometry_base(&self) -> &GeometryBase {
        &self.base
    }

    pub fn geometry_base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    /// Same count, identical transform and pairwise squared distance within `epsilon²`
    pub fn equals_points(&self, other: &Self, epsilon: f64) -> bool {
        self.points.len() == other.points.len()
            && self.base.transformation_matrix == other.base.transformation_matrix
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.distance_squared(b) <= epsilon * epsilon)
    }
}

impl<T: ControlPoint> Default for PointListGeometry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SpatialPoint + 'static> Geometry for PointListGeometry<T> {
    fn base(&self) -> &GeometryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GeometryBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Drop points on the positive side; the plane is given in world space
    fn clip(&mut self, plane: &Plane, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        let local_plane = if self.base.is_identity() {
            *plane
        } else {
            plane.transform(&self.base.inverted()?)?
        };

        let before = self.points.len();
        self.points
            .retain(|point| local_plane.signed_distance(&point.position()) <= epsilon);
        trace!("clipped point list: {} -> {} points", before, self.points.len());
        Ok(())
    }

    fn bounding_box(&self, transformed: bool) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for point in &self.points {
            bbox.expand_to_include(&point.position());
        }
        if transformed {
            bbox.transform(&self.base.transformation_matrix)
        } else {
            bbox
        }
    }

    fn to_xml(&self) -> Result<String> {
        xml::point_list_to_xml(self)
    }

    fn equals(&self, other: &dyn Geometry, epsilon: f64) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|list| self.equals_points(list, epsilon))
    }
}

impl<T: ControlPoint> FromIterator<T> for PointListGeometry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix4, Point3};

    fn line() -> PointListGeometryVec3 {
        (0..5).map(|i| Vector3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_container_operations() {
        let mut list = PointListGeometryVec3::new();
        assert!(list.is_empty());
        list.add_point(Vector3::new(1.0, 2.0, 3.0));
        list.add_point(Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(list.len(), 2);
        assert_eq!(list.point(1), Some(&Vector3::new(4.0, 5.0, 6.0)));
        assert_eq!(list.remove_last(), Some(Vector3::new(4.0, 5.0, 6.0)));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.remove_last(), None);
    }

    #[test]
    fn test_clip_filters_points() {
        let mut list = line();
        list.clip(&Plane::new(Vector3::new(1.0, 0.0, 0.0), 2.0), 1e-6)
            .unwrap();
        assert_eq!(
            list.points(),
            &[
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(2.0, 0.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_clip_in_local_space() {
        // the list sits 10 units to the right in world space
        let mut list = line();
        list.transform(&Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0)));
        list.clip(&Plane::new(Vector3::new(1.0, 0.0, 0.0), 11.5), 1e-6)
            .unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_clip_singular_transform() {
        let mut list = line();
        list.set_transformation_matrix(Matrix4::zeros());
        assert!(list
            .clip(&Plane::new(Vector3::new(1.0, 0.0, 0.0), 0.0), 1e-6)
            .is_err());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_bounding_box() {
        let mut list = line();
        list.transform(&Matrix4::new_scaling(2.0));
        let local = list.bounding_box(false);
        assert_eq!(local.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(local.max, Point3::new(4.0, 0.0, 0.0));
        let world = list.bounding_box(true);
        assert_eq!(world.max, Point3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn test_equals() {
        let a = line();
        let mut b = line();
        assert!(a.equals(&b, 1e-6));

        b.set_points(
            a.iter()
                .map(|p| p + Vector3::new(0.0, 1e-4, 0.0))
                .collect(),
        );
        assert!(!a.equals(&b, 1e-6));
        assert!(a.equals(&b, 1e-3));

        let mut moved = line();
        moved.transform(&Matrix4::new_translation(&Vector3::new(0.0, 0.0, 1e-9)));
        assert!(!a.equals(&moved, 1.0));

        let planar: PointListGeometryVec2 = (0..5).map(|i| Vector2::new(i as f64, 0.0)).collect();
        assert!(!a.equals(&planar, 1.0));
    }
}
