// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Public API: construction, configuration, kernel batches and ray recovery

use anyhow::Result;
use approx::assert_relative_eq;
use meshbool::csg::{ray_trace, Face, ObjectGraph};
use meshbool::geometry::analytics::volume;
use meshbool::kernel::BooleanTask;
use meshbool::{BooleanOp, CsgConfig, CsgError, Kernel, Primitive, Solid};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cube(offset: f64) -> Solid {
    let mut solid = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_solid().unwrap();
    solid.translate(offset, offset, offset);
    solid
}

#[test]
fn test_construction_errors() {
    let coords = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    let ragged = Solid::from_arrays(&coords[..8], &[0u32, 1, 2]);
    assert!(matches!(ragged, Err(CsgError::Construction { .. })));

    let out_of_range = Solid::from_arrays(&coords, &[0u32, 1, 3]);
    assert!(matches!(out_of_range, Err(CsgError::Construction { .. })));

    let partial_triangle = Solid::from_arrays(&coords, &[0u32, 1]);
    assert!(matches!(partial_triangle, Err(CsgError::Construction { .. })));

    let negative = Solid::from_arrays(&coords, &[0i32, -1, 2]);
    assert!(matches!(negative, Err(CsgError::Construction { .. })));

    assert!(Solid::from_arrays(&coords, &[0u32, 1, 2]).is_ok());
}

#[test]
fn test_degenerate_input_aborts_evaluation() {
    // second triangle repeats a corner
    let broken = Solid::from_arrays(
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        &[0u32, 1, 2, 0, 0, 1],
    )
    .unwrap();
    let result = meshbool::boolean(&broken, &cube(0.0), BooleanOp::Union);
    assert!(matches!(result, Err(CsgError::DegenerateGeometry { .. })));
}

#[test]
fn test_deserialized_solid_is_validated() -> Result<()> {
    let bad: Solid =
        serde_json::from_str(r#"{"vertices":[[0,0,0],[1,0,0],[0,1,0]],"indices":[0,1,7]}"#)?;
    for op in BooleanOp::ALL {
        let result = meshbool::boolean(&bad, &cube(0.0), op);
        assert!(matches!(result, Err(CsgError::Construction { .. })));
        let result = meshbool::boolean(&cube(0.0), &bad, op);
        assert!(matches!(result, Err(CsgError::Construction { .. })));
    }
    Ok(())
}

#[test]
fn test_flat_arrays_roundtrip_through_boolean() -> Result<()> {
    let a = cube(0.0);
    let b = Solid::from_arrays(&cube(0.5).vertex_array(), cube(0.5).indices())?;
    let result = a.boolean(&b, BooleanOp::Intersection)?;

    let (vertices, indices) = result.clone().into_parts();
    assert_eq!(vertices.len() * 3, result.vertex_array().len());
    assert_eq!(indices.len(), result.triangle_count() * 3);
    assert_relative_eq!(volume(&result), 0.125, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_config_roundtrip() -> Result<()> {
    let config = CsgConfig {
        seed: 99,
        max_ray_attempts: 4,
        ..CsgConfig::default()
    };
    let text = toml::to_string_pretty(&config)?;
    assert_eq!(CsgConfig::from_toml_str(&text)?, config);

    let json = serde_json::to_string(&config)?;
    assert_eq!(serde_json::from_str::<CsgConfig>(&json)?, config);
    Ok(())
}

#[test]
fn test_config_file_roundtrip() -> Result<()> {
    let path = std::env::temp_dir().join(format!("meshbool-config-{}.toml", std::process::id()));
    let config = CsgConfig {
        vertex_tolerance: 1e-6,
        ..CsgConfig::default()
    };
    config.save(&path)?;
    let loaded = CsgConfig::from_file(&path);
    std::fs::remove_file(&path)?;
    assert_eq!(loaded?, config);
    Ok(())
}

#[test]
fn test_seed_does_not_change_clean_results() -> Result<()> {
    let a = cube(0.0);
    let b = cube(0.5);
    let default = Kernel::new().evaluate(&a, &b, BooleanOp::Union)?;
    let reseeded = Kernel::with_config(CsgConfig {
        seed: 1,
        ..CsgConfig::default()
    })?
    .evaluate(&a, &b, BooleanOp::Union)?;
    assert_eq!(default, reseeded);
    Ok(())
}

#[test]
fn test_batch_evaluation() -> Result<()> {
    let kernel = Kernel::new();
    let tasks = vec![
        BooleanTask::new(cube(0.0), cube(0.5), BooleanOp::Intersection),
        BooleanTask::new(cube(0.0), cube(0.5), BooleanOp::Union),
        BooleanTask::new(cube(0.0), cube(0.5), BooleanOp::Difference),
        BooleanTask::new(cube(0.0), cube(5.0), BooleanOp::Intersection),
    ];

    let volumes = kernel
        .evaluate_batch(&tasks)
        .into_iter()
        .map(|r| r.map(|solid| volume(&solid)))
        .collect::<meshbool::Result<Vec<f64>>>()?;

    let expected = [0.125, 1.875, 0.875, 0.0];
    for (got, want) in volumes.iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_coplanar_ray_retries_are_bounded() -> Result<()> {
    // ray from the origin along +z lies in the plane x = 0 of the target triangle
    let face = Face::new(
        [0, 1, 2],
        [
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
            Point3::new(-1.0, 2.0, 0.0),
        ],
    )?;
    let target = Solid::from_arrays(
        &[0.0, -1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 3.0],
        &[0u32, 1, 2],
    )?;

    let config = CsgConfig::default();
    let graph = ObjectGraph::new(&target, &config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let cast = ray_trace(&face, &graph, &config, &mut rng)?;
    assert!(cast.casts > 1);
    assert!(cast.casts <= config.max_ray_attempts + 1);

    let strict = CsgConfig {
        max_ray_attempts: 0,
        ..CsgConfig::default()
    };
    let stalled = ray_trace(&face, &graph, &strict, &mut rng);
    assert!(matches!(stalled, Err(CsgError::ClassificationStall { .. })));
    Ok(())
}

#[test]
fn test_solid_transforms_preserve_volume() {
    let mut solid = cube(0.0);
    solid.rotate(0.3, 0.7);
    assert_relative_eq!(volume(&solid), 1.0, epsilon = 1e-9);

    solid.scale(2.0, 1.0, 0.5);
    assert_relative_eq!(volume(&solid), 1.0, epsilon = 1e-9);

    solid.zoom(4.0);
    assert_relative_eq!(volume(&solid), 1.0, epsilon = 1e-9);
}
