// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Catmull-Rom interpolation over point sequences
//! Works for any [`ControlPoint`] type, evaluated through cubic Hermite blending

use crate::geometry::ControlPoint;

/// Total length of the polyline through `points`
pub fn polyline_length<T: ControlPoint>(points: &[T]) -> f64 {
    points.windows(2).map(|pair| pair[0].distance(&pair[1])).sum()
}

/// Catmull-Rom tangent at `index`: mean of the incoming and outgoing chords.
/// Chords past either end of the sequence count as zero.
pub fn tangent<T: ControlPoint>(points: &[T], index: usize) -> T {
    if index >= points.len() {
        return T::zero();
    }
    let incoming = if index > 0 {
        points[index] - points[index - 1]
    } else {
        T::zero()
    };
    let outgoing = if index + 1 < points.len() {
        points[index + 1] - points[index]
    } else {
        T::zero()
    };
    (incoming + outgoing) * 0.5
}

/// Cubic Hermite blend between `p0` and `p1` with tangents `m0`, `m1`
pub fn hermite<T: ControlPoint>(p0: T, p1: T, m0: T, m1: T, t: f64) -> T {
    let t2 = t * t;
    let t3 = t2 * t;
    let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h2 = -2.0 * t3 + 3.0 * t2;
    let h3 = t3 - 2.0 * t2 + t;
    let h4 = t3 - t2;
    p0 * h1 + p1 * h2 + m0 * h3 + m1 * h4
}

/// Point at arclength fraction `t` of the spline through `points`.
///
/// `length` is the total polyline length, usually from [`polyline_length`].
/// `t` is clamped to `[0, 1]`; zero-length segments are skipped.
pub fn catmull_rom<T: ControlPoint>(points: &[T], t: f64, length: f64) -> T {
    match points {
        [] => return T::zero(),
        [single] => return *single,
        _ => {}
    }
    if length <= 0.0 {
        return points[0];
    }

    let target = t.clamp(0.0, 1.0) * length;
    let last_segment = points.len() - 2;
    let mut travelled = 0.0;

    for i in 0..=last_segment {
        let segment = points[i].distance(&points[i + 1]);
        if segment <= 0.0 {
            continue;
        }
        if travelled + segment >= target || i == last_segment {
            let s = ((target - travelled) / segment).clamp(0.0, 1.0);
            return hermite(
                points[i],
                points[i + 1],
                tangent(points, i),
                tangent(points, i + 1),
                s,
            );
        }
        travelled += segment;
    }

    points[points.len() - 1]
}

/// `samples` points evenly spaced in arclength along the spline
pub fn sample_catmull_rom<T: ControlPoint>(points: &[T], samples: usize) -> Vec<T> {
    let length = polyline_length(points);
    match samples {
        0 => Vec::new(),
        1 => vec![catmull_rom(points, 0.0, length)],
        _ => (0..samples)
            .map(|k| catmull_rom(points, k as f64 / (samples - 1) as f64, length))
            .collect(),
    }
}
