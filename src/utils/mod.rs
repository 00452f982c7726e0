// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Utilities - scalar math and spline interpolation

pub mod math;
pub mod spline;

pub use spline::{catmull_rom, hermite, polyline_length, sample_catmull_rom, tangent};
