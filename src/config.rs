// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluation configuration: tolerances, retry bounds and the perturbation seed

use crate::error::CsgError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`CsgConfig::load`]
pub const CONFIG_FILE: &str = "meshbool.toml";

/// Tolerances and limits for one boolean evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsgConfig {
    /// Sign classification, plane/line/ray tests and segment overlap
    pub plane_tolerance: f64,
    /// Positional vertex equality and output deduplication
    pub vertex_tolerance: f64,
    /// Maximum number of perturbed recasts per face before giving up
    pub max_ray_attempts: usize,
    /// Scale of the per-axis random offset added to a degenerate ray
    pub perturbation: f64,
    /// Seed of the perturbation generator
    pub seed: u64,
    /// Splitting may grow an object to at most this many times its face count
    pub max_split_growth: usize,
}

impl Default for CsgConfig {
    fn default() -> Self {
        Self {
            plane_tolerance: 1e-10,
            vertex_tolerance: 1e-5,
            max_ray_attempts: 10,
            perturbation: 1e-5,
            seed: 0x5eed_cafe,
            max_split_growth: 64,
        }
    }
}

impl CsgConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CsgConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path.as_ref()))
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(seed) = std::env::var("MESHBOOL_SEED") {
            config.seed = seed
                .parse()
                .with_context(|| format!("MESHBOOL_SEED is not an integer: {}", seed))?;
        }

        if let Ok(attempts) = std::env::var("MESHBOOL_MAX_RAY_ATTEMPTS") {
            config.max_ray_attempts = attempts.parse().with_context(|| {
                format!("MESHBOOL_MAX_RAY_ATTEMPTS is not an integer: {}", attempts)
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject values the splitting and classification passes cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.plane_tolerance > 0.0) || !self.plane_tolerance.is_finite() {
            return Err(CsgError::Config(format!(
                "plane_tolerance must be positive, got {}",
                self.plane_tolerance
            )));
        }
        if !(self.vertex_tolerance > 0.0) || !self.vertex_tolerance.is_finite() {
            return Err(CsgError::Config(format!(
                "vertex_tolerance must be positive, got {}",
                self.vertex_tolerance
            )));
        }
        if !(self.perturbation > 0.0) || !self.perturbation.is_finite() {
            return Err(CsgError::Config(format!(
                "perturbation must be positive, got {}",
                self.perturbation
            )));
        }
        if self.max_split_growth == 0 {
            return Err(CsgError::Config("max_split_growth must be at least 1".into()));
        }
        Ok(())
    }
}
