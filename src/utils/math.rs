// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use crate::geometry::ControlPoint;

/// Linear interpolation `a + (b - a) * t`; `t` is not clamped
pub fn lerp<T: ControlPoint>(a: T, b: T, t: f64) -> T {
    a + (b - a) * t
}

/// Collapse values within `epsilon` of zero to exactly zero
pub fn snap_to_zero(value: f64, epsilon: f64) -> f64 {
    if value.abs() <= epsilon {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(
            lerp(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 4.0, -2.0), 0.5),
            Vector3::new(1.0, 2.0, -1.0)
        );
    }

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(1e-7, 1e-6), 0.0);
        assert_eq!(snap_to_zero(-1e-7, 1e-6), 0.0);
        assert_eq!(snap_to_zero(0.5, 1e-6), 0.5);
    }
}
