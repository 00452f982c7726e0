// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel tolerance configuration

use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file looked up by [`GeometryConfig::load`]
pub const CONFIG_FILE: &str = "proxygeom.toml";

/// Tolerances used when clipping and comparing geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Distance below which vertices are snapped onto clipping planes
    pub clip_epsilon: f64,
    /// Tolerance for structural equality checks
    pub equality_epsilon: f64,
    /// Samples taken along splines when they are flattened to polylines
    pub spline_samples: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            clip_epsilon: 1e-5,
            equality_epsilon: 1e-5,
            spline_samples: 32,
        }
    }
}

impl GeometryConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: GeometryConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `proxygeom.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `PROXYGEOM_*` overrides; unparsable values are ignored with a warning
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("PROXYGEOM_CLIP_EPSILON") {
            match value.parse() {
                Ok(epsilon) => self.clip_epsilon = epsilon,
                Err(_) => warn!("ignoring PROXYGEOM_CLIP_EPSILON={value:?}"),
            }
        }

        if let Some(value) = lookup("PROXYGEOM_EQUALITY_EPSILON") {
            match value.parse() {
                Ok(epsilon) => self.equality_epsilon = epsilon,
                Err(_) => warn!("ignoring PROXYGEOM_EQUALITY_EPSILON={value:?}"),
            }
        }

        if let Some(value) = lookup("PROXYGEOM_SPLINE_SAMPLES") {
            match value.parse() {
                Ok(samples) => self.spline_samples = samples,
                Err(_) => warn!("ignoring PROXYGEOM_SPLINE_SAMPLES={value:?}"),
            }
        }
    }

    /// Reject negative or NaN tolerances
    pub fn validate(&self) -> Result<()> {
        if self.clip_epsilon < 0.0 || self.clip_epsilon.is_nan() {
            bail!("clip_epsilon must be non-negative, got {}", self.clip_epsilon);
        }
        if self.equality_epsilon < 0.0 || self.equality_epsilon.is_nan() {
            bail!(
                "equality_epsilon must be non-negative, got {}",
                self.equality_epsilon
            );
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeometryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clip_epsilon, 1e-5);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PROXYGEOM_CLIP_EPSILON", "1e-3"),
            ("PROXYGEOM_EQUALITY_EPSILON", "not a number"),
            ("PROXYGEOM_SPLINE_SAMPLES", "8"),
        ]
        .into_iter()
        .collect();

        let mut config = GeometryConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.clip_epsilon, 1e-3);
        assert_eq!(config.equality_epsilon, 1e-5);
        assert_eq!(config.spline_samples, 8);
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        let config = GeometryConfig {
            clip_epsilon: -1.0,
            ..GeometryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: GeometryConfig = toml::from_str("clip_epsilon = 0.01").unwrap();
        assert_eq!(config.clip_epsilon, 0.01);
        assert_eq!(config.spline_samples, 32);
    }
}
