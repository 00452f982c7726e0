// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - vertices, faces, point lists and their clipping

mod base;
mod bbox;
mod face;
mod plane;
mod point;
mod point_list;
mod primitives;
mod vertex;

pub use base::{Geometry, GeometryBase};
pub use bbox::BoundingBox;
pub use face::Face;
pub use plane::Plane;
pub use point::{ControlPoint, SpatialPoint};
pub use point_list::{PointListGeometry, PointListGeometryVec2, PointListGeometryVec3};
pub use primitives::{proxy_face, proxy_vertex, FaceDirection, Primitive};
pub use vertex::{Vertex, VertexState};
