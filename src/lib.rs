// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Proxygeom geometry kernel
//!
//! Geometric primitives for building and trimming volume-rendering proxy
//! geometry: attributed vertices, convex faces clipped against arbitrary
//! planes, transform-aware point lists and Catmull-Rom splines over them.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::GeometryConfig;
pub use error::{GeometryError, Result};
pub use geometry::{
    BoundingBox, Face, Geometry, PointListGeometry, PointListGeometryVec3, Plane, Primitive,
    Vertex,
};

use log::debug;

/// Clip a geometry against every plane in turn with the configured epsilon
pub fn clip_with_planes(
    geometry: &mut dyn Geometry,
    planes: &[Plane],
    config: &GeometryConfig,
) -> Result<()> {
    for (i, plane) in planes.iter().enumerate() {
        geometry.clip(plane, config.clip_epsilon)?;
        debug!("applied clipping plane {i}: {plane:?}");
    }
    Ok(())
}
