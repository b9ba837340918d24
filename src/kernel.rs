// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API: configured boolean evaluation, single or batched

use crate::config::CsgConfig;
use crate::csg::{boolean_with_config, BooleanModeller, BooleanOp};
use crate::error::Result;
use crate::geometry::Solid;
use rayon::prelude::*;
use tracing::debug;

/// One boolean job for [`Kernel::evaluate_batch`]
#[derive(Debug, Clone)]
pub struct BooleanTask {
    pub first: Solid,
    pub second: Solid,
    pub op: BooleanOp,
}

impl BooleanTask {
    pub fn new(first: Solid, second: Solid, op: BooleanOp) -> Self {
        Self { first, second, op }
    }
}

/// Configuration-holding entry point for boolean evaluation
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: CsgConfig,
}

impl Kernel {
    /// Create a kernel with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a kernel with a validated configuration
    pub fn with_config(config: CsgConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// Evaluate one operation
    pub fn evaluate(&self, first: &Solid, second: &Solid, op: BooleanOp) -> Result<Solid> {
        boolean_with_config(first, second, op, &self.config)
    }

    /// Split and classify once for callers that need several operators on the same pair
    pub fn modeller(&self, first: &Solid, second: &Solid) -> Result<BooleanModeller> {
        BooleanModeller::with_config(first, second, &self.config)
    }

    /// Evaluate independent tasks in parallel; results keep the task order
    pub fn evaluate_batch(&self, tasks: &[BooleanTask]) -> Vec<Result<Solid>> {
        debug!(tasks = tasks.len(), "evaluating batch");
        tasks
            .par_iter()
            .map(|task| self.evaluate(&task.first, &task.second, task.op))
            .collect()
    }

    /// Left fold `op` over `solids`: `((s0 op s1) op s2) ...`
    pub fn evaluate_chain(&self, solids: &[Solid], op: BooleanOp) -> Result<Solid> {
        let Some((first, rest)) = solids.split_first() else {
            return Ok(Solid::empty());
        };

        let mut result = first.clone();
        for solid in rest {
            result = self.evaluate(&result, solid, op)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsgError;
    use crate::geometry::analytics::volume;
    use crate::geometry::Primitive;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn cube(offset: f64) -> Solid {
        let mut solid = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_solid().unwrap();
        solid.translate(offset, offset, offset);
        solid
    }

    #[test]
    fn test_kernel_rejects_invalid_config() {
        let config = CsgConfig {
            plane_tolerance: -1.0,
            ..CsgConfig::default()
        };
        assert!(matches!(Kernel::with_config(config), Err(CsgError::Config(_))));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let kernel = Kernel::new();
        let tasks: Vec<BooleanTask> = BooleanOp::ALL
            .iter()
            .map(|&op| BooleanTask::new(cube(0.0), cube(0.5), op))
            .collect();

        let results = kernel.evaluate_batch(&tasks);
        assert_eq!(results.len(), 3);
        for (task, result) in tasks.iter().zip(results) {
            let sequential = kernel.evaluate(&task.first, &task.second, task.op).unwrap();
            assert_eq!(result.unwrap(), sequential);
        }
    }

    #[test]
    fn test_chain() {
        let kernel = Kernel::new();
        assert!(kernel.evaluate_chain(&[], BooleanOp::Union).unwrap().is_empty());

        let single = kernel.evaluate_chain(&[cube(0.0)], BooleanOp::Union).unwrap();
        assert_eq!(single, cube(0.0));

        let joined = kernel
            .evaluate_chain(&[cube(0.0), cube(3.0), cube(6.0)], BooleanOp::Union)
            .unwrap();
        assert_relative_eq!(volume(&joined), 3.0, epsilon = 1e-9);
    }
}
