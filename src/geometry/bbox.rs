// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
///
/// A box built from no points is *undefined*: `min` is `+inf` and `max` is `-inf`,
/// so that including the first point makes it a degenerate box at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Zero-volume box at a single point
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self {
            min: *point,
            max: *point,
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// True once at least one point has been included
    pub fn is_defined(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Grow to cover another box; undefined boxes are ignored
    pub fn union(&mut self, other: &BoundingBox) {
        if !other.is_defined() {
            return;
        }
        self.expand_to_include(&other.min);
        self.expand_to_include(&other.max);
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box enclosing this box after mapping it through `matrix`
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Self {
        if !self.is_defined() {
            return *self;
        }
        let corners = self.corners().map(|corner| matrix.transform_point(&corner));
        Self::from_points(corners.iter())
    }

    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        self.is_defined()
            && point.x >= self.min.x
            && point.y >= self.min.y
            && point.z >= self.min.z
            && point.x <= self.max.x
            && point.y <= self.max.y
            && point.z <= self.max.z
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        if !self.is_defined() {
            return 0.0;
        }
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        if !self.is_defined() || !other.is_defined() {
            return self.is_defined() == other.is_defined();
        }
        (self.min - other.min).abs().max() <= tolerance
            && (self.max - other.max).abs().max() <= tolerance
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let mut bbox = BoundingBox::empty();
        assert!(!bbox.is_defined());
        bbox.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        bbox.expand_to_include(&Point3::new(-1.0, -2.0, -3.0));

        assert!(bbox.is_defined());
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(bbox.max, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(bbox.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.volume(), 48.0);
    }

    #[test]
    fn test_degenerate_box_is_defined() {
        let bbox = BoundingBox::from_point(&Point3::new(1.0, 1.0, 1.0));
        assert!(bbox.is_defined());
        assert_eq!(bbox.volume(), 0.0);
        assert!(bbox.contains_point(&Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_union_ignores_undefined() {
        let mut bbox = BoundingBox::from_point(&Point3::new(0.0, 0.0, 0.0));
        bbox.union(&BoundingBox::empty());
        assert_eq!(bbox, BoundingBox::from_point(&Point3::new(0.0, 0.0, 0.0)));
        bbox.union(&BoundingBox::from_point(&Point3::new(2.0, -1.0, 3.0)));
        assert_eq!(bbox.max, Point3::new(2.0, 0.0, 3.0));
        assert_eq!(bbox.min, Point3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_transform() {
        let bbox = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let moved = bbox.transform(&Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0)));
        assert!(moved.approx_eq(
            &BoundingBox::new(Point3::new(0.0, 1.0, 2.0), Point3::new(2.0, 3.0, 4.0)),
            1e-12
        ));

        let rotated = bbox.transform(&Matrix4::new_rotation(Vector3::new(
            0.0,
            0.0,
            std::f64::consts::FRAC_PI_4,
        )));
        let half_diagonal = 2.0_f64.sqrt();
        assert!((rotated.max.x - half_diagonal).abs() < 1e-12);
        assert!((rotated.max.z - 1.0).abs() < 1e-12);

        assert!(!BoundingBox::empty().transform(&Matrix4::identity()).is_defined());
    }
}
