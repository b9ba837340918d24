// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for boolean evaluation

use thiserror::Error;

/// Errors that abort a boolean evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CsgError {
    /// Malformed vertex/index arrays or an inverted bound
    #[error("Construction error: {message}")]
    Construction { message: String },

    /// A plane or intersection could not be defined
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// The perturb-and-recast ray loop did not find a clean cast
    #[error("Classification stalled after {attempts} ray attempts")]
    ClassificationStall { attempts: usize },

    /// Face splitting kept producing new faces past the growth cap
    #[error("Face splitting exceeded limit: {faces} faces (max: {limit})")]
    SplitLimitExceeded { faces: usize, limit: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CsgError {
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CsgError>;
