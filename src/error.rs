// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the geometry kernel

use thiserror::Error;

/// Errors raised by geometry operations
#[derive(Debug, Error)]
pub enum GeometryError {
    /// An argument was outside its valid domain (e.g. a negative epsilon)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller violated a documented precondition (e.g. read an unset normal)
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The transformation matrix has no inverse, so local-space operations are undefined
    #[error("transformation matrix is not invertible")]
    SingularTransform,

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Result alias used throughout the kernel
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Reject negative tolerances before any geometry is touched
pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon < 0.0 || epsilon.is_nan() {
        return Err(GeometryError::InvalidArgument(format!(
            "epsilon must be non-negative, got {epsilon}"
        )));
    }
    Ok(())
}
