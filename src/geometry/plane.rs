// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Clipping planes

use crate::error::{GeometryError, Result};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Plane `dot(normal, x) - offset = 0`
///
/// Points with a signed distance `<= 0` lie on the kept side when clipping.
/// The normal does not have to be unit length, but distances (and therefore
/// epsilon comparisons) are scaled by its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub offset: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Plane through `point` with the given normal
    pub fn from_point_normal(point: &Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            normal,
            offset: normal.dot(&point.coords),
        }
    }

    /// Plane through three points, normal following the counter-clockwise winding
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let length = normal.norm();
        if length < 1e-12 {
            return None;
        }
        Some(Self::from_point_normal(a, normal / length))
    }

    /// Homogeneous form `(n, -c)`
    pub fn to_homogeneous(&self) -> Vector4<f64> {
        Vector4::new(self.normal.x, self.normal.y, self.normal.z, -self.offset)
    }

    pub fn from_homogeneous(v: &Vector4<f64>) -> Self {
        Self {
            normal: Vector3::new(v.x, v.y, v.z),
            offset: -v.w,
        }
    }

    /// Signed distance of a point (not divided by the normal's length)
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Same plane with a unit-length normal
    pub fn normalized(&self) -> Self {
        let length = self.normal.norm();
        if length == 0.0 {
            return *self;
        }
        Self {
            normal: self.normal / length,
            offset: self.offset / length,
        }
    }

    /// Same plane keeping the opposite half-space
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Map the plane through a point transformation.
    ///
    /// If `x' = M x`, the transformed plane contains exactly the images of the
    /// points on this plane: `pi' = M^-T pi` in homogeneous form.
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Result<Self> {
        let inverse = matrix
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)?;
        Ok(Self::from_homogeneous(&(inverse.transpose() * self.to_homogeneous())))
    }
}
