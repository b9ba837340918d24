// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Split-and-classify pipeline shared by all three operations

use super::compose::compose;
use super::{BooleanOp, ObjectGraph};
use crate::config::CsgConfig;
use crate::error::Result;
use crate::geometry::Solid;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

/// Two solids split against each other and classified, ready to compose.
///
/// Construction does all the expensive work. Union, intersection and difference
/// then only select faces, so one modeller can answer all three.
#[derive(Debug, Clone)]
pub struct BooleanModeller {
    first: ObjectGraph,
    second: ObjectGraph,
    config: CsgConfig,
}

impl BooleanModeller {
    pub fn new(first: &Solid, second: &Solid) -> Result<Self> {
        Self::with_config(first, second, &CsgConfig::default())
    }

    #[instrument(skip_all, fields(
        first_triangles = first.triangle_count(),
        second_triangles = second.triangle_count(),
    ))]
    pub fn with_config(first: &Solid, second: &Solid, config: &CsgConfig) -> Result<Self> {
        config.validate()?;

        let mut a = ObjectGraph::new(first, config)?;
        let mut b = ObjectGraph::new(second, config)?;

        let overlapping = match (a.bound(), b.bound()) {
            (Some(x), Some(y)) => x.overlaps(y, config.plane_tolerance),
            _ => false,
        };
        if overlapping {
            let split_a = a.split_faces(&b, config)?;
            let split_b = b.split_faces(&a, config)?;
            debug!(
                split_a,
                split_b,
                faces_a = a.face_count(),
                faces_b = b.face_count(),
                "faces split"
            );
        } else {
            debug!("bounds do not overlap, skipping split");
        }

        // one generator for the whole evaluation keeps results reproducible per seed
        let mut rng = StdRng::seed_from_u64(config.seed);
        let traced_a = a.classify_faces(&b, config, &mut rng)?;
        let traced_b = b.classify_faces(&a, config, &mut rng)?;
        debug!(traced_a, traced_b, "faces classified");

        Ok(Self {
            first: a,
            second: b,
            config: config.clone(),
        })
    }

    pub fn first(&self) -> &ObjectGraph {
        &self.first
    }

    pub fn second(&self) -> &ObjectGraph {
        &self.second
    }

    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// Result of `op`; may be called any number of times
    pub fn compose(&self, op: BooleanOp) -> Result<Solid> {
        compose(&self.first, &self.second, op, self.config.vertex_tolerance)
    }

    pub fn union(&self) -> Result<Solid> {
        self.compose(BooleanOp::Union)
    }

    pub fn intersection(&self) -> Result<Solid> {
        self.compose(BooleanOp::Intersection)
    }

    pub fn difference(&self) -> Result<Solid> {
        self.compose(BooleanOp::Difference)
    }
}
