// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boolean operations on closed triangle meshes.
//!
//! Each evaluation copies both solids into private [`ObjectGraph`]s, splits the
//! faces of each along the other's surface, classifies every face as inside,
//! outside or coincident with a ray cast when vertex statuses do not decide it,
//! and finally assembles the selected faces into a new [`Solid`].

mod classify;
mod compose;
mod face;
mod modeller;
mod object;
pub mod segment;
mod split;
mod vertex;
mod weld;

pub use classify::{ray_trace, RayCast};
pub use face::{Face, FaceId};
pub use modeller::BooleanModeller;
pub use object::ObjectGraph;
pub use segment::Segment;
pub use vertex::{mark, Status, Vertex, VertexId};
pub use weld::PointWelder;

use crate::config::CsgConfig;
use crate::error::{CsgError, Result};
use crate::geometry::Solid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

/// Boolean operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
}

impl BooleanOp {
    pub const ALL: [BooleanOp; 3] = [Self::Union, Self::Intersection, Self::Difference];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BooleanOp {
    type Err = CsgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "union" | "add" => Ok(Self::Union),
            "intersection" | "intersect" => Ok(Self::Intersection),
            "difference" | "subtract" => Ok(Self::Difference),
            other => Err(CsgError::Config(format!("unknown boolean operation: {}", other))),
        }
    }
}

/// Evaluate `op` on two solids with the default configuration
pub fn boolean(first: &Solid, second: &Solid, op: BooleanOp) -> Result<Solid> {
    boolean_with_config(first, second, op, &CsgConfig::default())
}

/// Evaluate `op` on two solids; inputs are never modified
#[instrument(skip(first, second, config), fields(op = %op))]
pub fn boolean_with_config(
    first: &Solid,
    second: &Solid,
    op: BooleanOp,
    config: &CsgConfig,
) -> Result<Solid> {
    let modeller = BooleanModeller::with_config(first, second, config)?;
    let result = modeller.compose(op)?;
    info!(
        triangles = result.triangle_count(),
        vertices = result.vertex_count(),
        "boolean evaluated"
    );
    Ok(result)
}
