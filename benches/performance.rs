// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshbool::kernel::BooleanTask;
use meshbool::{boolean, BooleanModeller, BooleanOp, Kernel, Primitive, Solid};
use nalgebra::Vector3;

fn offset_cube(offset: f64) -> Solid {
    let mut solid = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_solid().unwrap();
    solid.translate(offset, offset, offset);
    solid
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("cube", |b| {
        b.iter(|| {
            Primitive::cube(black_box(Vector3::new(10.0, 10.0, 10.0)), false)
                .to_solid()
                .unwrap()
        });
    });

    group.bench_function("sphere_32", |b| {
        b.iter(|| Primitive::sphere(black_box(10.0), black_box(32)).to_solid().unwrap());
    });

    group.bench_function("cylinder", |b| {
        b.iter(|| {
            Primitive::cylinder(black_box(20.0), black_box(5.0), black_box(32))
                .to_solid()
                .unwrap()
        });
    });

    group.finish();
}

fn bench_boolean_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("boolean_ops");

    let cube1 = offset_cube(0.0);
    let cube2 = offset_cube(0.5);

    for op in BooleanOp::ALL {
        group.bench_with_input(BenchmarkId::new("cubes", op), &op, |b, &op| {
            b.iter(|| boolean(black_box(&cube1), black_box(&cube2), op).unwrap());
        });
    }

    group.bench_function("modeller_all_ops", |b| {
        b.iter(|| {
            let modeller = BooleanModeller::new(black_box(&cube1), black_box(&cube2)).unwrap();
            (
                modeller.union().unwrap(),
                modeller.intersection().unwrap(),
                modeller.difference().unwrap(),
            )
        });
    });

    group.finish();
}

fn bench_sphere_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_minus_sphere");
    group.sample_size(20);

    let cube = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true).to_solid().unwrap();
    for segments in [8u32, 16, 24] {
        let mut sphere = Primitive::sphere(0.6, segments).to_solid().unwrap();
        sphere.translate(0.11, 0.07, 0.05);
        group.bench_with_input(BenchmarkId::from_parameter(segments), &sphere, |b, sphere| {
            b.iter(|| boolean(&cube, black_box(sphere), BooleanOp::Difference).unwrap());
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let kernel = Kernel::new();
    let tasks: Vec<BooleanTask> = (0..16)
        .map(|i| BooleanTask::new(offset_cube(0.0), offset_cube(0.1 + 0.05 * i as f64), BooleanOp::Union))
        .collect();

    c.bench_function("batch_union_16", |b| {
        b.iter(|| kernel.evaluate_batch(black_box(&tasks)));
    });
}

criterion_group!(
    benches,
    bench_primitives,
    bench_boolean_ops,
    bench_sphere_resolution,
    bench_batch
);
criterion_main!(benches);
