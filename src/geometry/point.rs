// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point-like value types accepted by point lists and spline helpers

use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Vector-like value with the arithmetic needed for interpolation
///
/// Types lacking subtraction, scaling or a length are rejected at compile time.
pub trait ControlPoint:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    fn zero() -> Self;

    /// Euclidean length
    fn length(&self) -> f64;

    fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        let d = self.distance(other);
        d * d
    }

    /// Components in storage order, used for persistence
    fn components(&self) -> &[f64];

    /// Rebuild from components; `None` if the count does not match
    fn from_components(components: &[f64]) -> Option<Self>;
}

/// Control point that also has a position in 3-D space
pub trait SpatialPoint: ControlPoint {
    fn position(&self) -> Point3<f64>;
}

impl ControlPoint for f64 {
    fn zero() -> Self {
        0.0
    }

    fn length(&self) -> f64 {
        self.abs()
    }

    fn components(&self) -> &[f64] {
        std::slice::from_ref(self)
    }

    fn from_components(components: &[f64]) -> Option<Self> {
        match components {
            [x] => Some(*x),
            _ => None,
        }
    }
}

macro_rules! impl_control_point_for_vector {
    ($ty:ty, $dim:expr) => {
        impl ControlPoint for $ty {
            fn zero() -> Self {
                <$ty>::zeros()
            }

            fn length(&self) -> f64 {
                self.norm()
            }

            fn distance_squared(&self, other: &Self) -> f64 {
                (self - other).norm_squared()
            }

            fn components(&self) -> &[f64] {
                self.as_slice()
            }

            fn from_components(components: &[f64]) -> Option<Self> {
                (components.len() == $dim).then(|| <$ty>::from_column_slice(components))
            }
        }
    };
}

impl_control_point_for_vector!(Vector2<f64>, 2);
impl_control_point_for_vector!(Vector3<f64>, 3);
impl_control_point_for_vector!(Vector4<f64>, 4);

impl SpatialPoint for Vector2<f64> {
    fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, 0.0)
    }
}

impl SpatialPoint for Vector3<f64> {
    fn position(&self) -> Point3<f64> {
        Point3::from(*self)
    }
}
