// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - XML and JSON persistence of geometry

mod json;
pub mod xml;

pub use json::{from_json, to_json};
pub use xml::{
    face_from_xml, face_to_xml, point_list_from_xml, point_list_to_xml, vertex_from_xml,
    vertex_to_xml,
};
