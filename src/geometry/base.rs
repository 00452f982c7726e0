// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Transformable geometry: shared transform state and the capability trait

use super::{BoundingBox, Plane};
use crate::error::{check_epsilon, GeometryError, Result};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::any::Any;
use std::fmt::Debug;

/// Model-to-world transform embedded by value in every concrete geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryBase {
    pub transformation_matrix: Matrix4<f64>,
}

impl GeometryBase {
    pub fn new() -> Self {
        Self {
            transformation_matrix: Matrix4::identity(),
        }
    }

    /// Accumulate a transform: `M = M * m`
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        self.transformation_matrix *= matrix;
    }

    pub fn inverted(&self) -> Result<Matrix4<f64>> {
        self.transformation_matrix
            .try_inverse()
            .ok_or(GeometryError::SingularTransform)
    }

    pub fn is_identity(&self) -> bool {
        self.transformation_matrix == Matrix4::identity()
    }
}

impl Default for GeometryBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Operations shared by every geometry the renderer and exporters consume
pub trait Geometry: Any + Debug {
    fn base(&self) -> &GeometryBase;

    fn base_mut(&mut self) -> &mut GeometryBase;

    fn as_any(&self) -> &dyn Any;

    fn transformation_matrix(&self) -> Matrix4<f64> {
        self.base().transformation_matrix
    }

    fn set_transformation_matrix(&mut self, matrix: Matrix4<f64>) {
        self.base_mut().transformation_matrix = matrix;
    }

    /// Right-multiply the stored transform; transforms accumulate
    fn transform(&mut self, matrix: &Matrix4<f64>) {
        self.base_mut().transform(matrix);
    }

    /// Inverse of the stored transform, computed on demand
    fn inverted_transformation_matrix(&self) -> Result<Matrix4<f64>> {
        self.base().inverted()
    }

    /// Clip against a plane, keeping the side with `distance <= 0`
    fn clip(&mut self, _plane: &Plane, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)
    }

    /// Bounding box in local space, or mapped through the transform when `transformed`
    fn bounding_box(&self, _transformed: bool) -> BoundingBox {
        BoundingBox::empty()
    }

    /// XML form including the transform
    fn to_xml(&self) -> Result<String>;

    /// SHA-256 of the XML form, hex encoded
    fn content_hash(&self) -> Result<String> {
        let xml = self.to_xml()?;
        let mut hasher = Sha256::new();
        hasher.update(xml.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Compare by content hash; implementors override with a structural comparison
    fn equals(&self, other: &dyn Geometry, _epsilon: f64) -> bool {
        match (self.content_hash(), other.content_hash()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
