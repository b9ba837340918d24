// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed primitive solids with shared vertices and outward winding

use super::Solid;
use crate::error::{CsgError, Result};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Radii below this collapse a rim into a single apex vertex
const APEX_EPS: f64 = 1e-12;

/// Geometric primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, fn_: u32 },
    Cylinder { h: f64, r: f64, fn_: u32 },
    Cone { h: f64, r1: f64, r2: f64, fn_: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, fn_: u32) -> Self {
        let segments = if fn_ > 0 { fn_.max(3) } else { 32 };
        Self::Sphere { r, fn_: segments }
    }

    pub fn cylinder(h: f64, r: f64, fn_: u32) -> Self {
        let segments = if fn_ > 0 { fn_.max(3) } else { 32 };
        Self::Cylinder {
            h,
            r,
            fn_: segments,
        }
    }

    pub fn cone(h: f64, r1: f64, r2: f64, fn_: u32) -> Self {
        let segments = if fn_ > 0 { fn_.max(3) } else { 32 };
        Self::Cone {
            h,
            r1,
            r2,
            fn_: segments,
        }
    }

    /// Tessellate into a closed solid; non-finite or non-positive dimensions are rejected
    pub fn to_solid(&self) -> Result<Solid> {
        self.check_dimensions()?;
        let (vertices, indices) = match self {
            Self::Cube { size, center } => generate_cube(*size, *center),
            Self::Sphere { r, fn_ } => generate_sphere(*r, *fn_),
            Self::Cylinder { h, r, fn_ } => generate_cone(*h, *r, *r, *fn_),
            Self::Cone { h, r1, r2, fn_ } => generate_cone(*h, *r1, *r2, *fn_),
        };
        Solid::new(vertices, indices)
    }

    fn check_dimensions(&self) -> Result<()> {
        let (positive, non_negative): (Vec<(&str, f64)>, Vec<(&str, f64)>) = match self {
            Self::Cube { size, .. } => (vec![("x", size.x), ("y", size.y), ("z", size.z)], vec![]),
            Self::Sphere { r, .. } => (vec![("r", *r)], vec![]),
            Self::Cylinder { h, r, .. } => (vec![("h", *h), ("r", *r)], vec![]),
            Self::Cone { h, r1, r2, .. } => (vec![("h", *h)], vec![("r1", *r1), ("r2", *r2)]),
        };

        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(CsgError::construction(format!(
                "{} must be positive and finite, got {}",
                name, value
            )));
        }
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            return Err(CsgError::construction(format!(
                "{} must be non-negative and finite, got {}",
                name, value
            )));
        }
        if let Self::Cone { r1, r2, .. } = self {
            if *r1 < APEX_EPS && *r2 < APEX_EPS {
                return Err(CsgError::construction("cone needs at least one non-zero radius"));
            }
        }
        Ok(())
    }
}

type Buffers = (Vec<Point3<f64>>, Vec<usize>);

fn generate_cube(size: Vector3<f64>, center: bool) -> Buffers {
    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    let vertices = vec![
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    #[rustfmt::skip]
    let indices = vec![
        4, 5, 6,  4, 6, 7, // z+
        1, 0, 3,  1, 3, 2, // z-
        5, 1, 2,  5, 2, 6, // x+
        0, 4, 7,  0, 7, 3, // x-
        7, 6, 2,  7, 2, 3, // y+
        0, 1, 5,  0, 5, 4, // y-
    ];

    (vertices, indices)
}

/// UV sphere around the origin with single pole vertices on the Y axis
fn generate_sphere(radius: f64, segments: u32) -> Buffers {
    let slices = segments as usize;
    let stacks = (slices / 2).max(2);

    let mut vertices = Vec::with_capacity(2 + (stacks - 1) * slices);
    vertices.push(Point3::new(0.0, radius, 0.0));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let r = radius * phi.sin();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            vertices.push(Point3::new(r * theta.cos(), y, r * theta.sin()));
        }
    }
    let south = vertices.len();
    vertices.push(Point3::new(0.0, -radius, 0.0));

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;

    let mut indices = Vec::with_capacity(6 * slices * (stacks - 1));
    for j in 0..slices {
        indices.extend_from_slice(&[0, ring(1, j + 1), ring(1, j)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (upper, upper_next) = (ring(i, j), ring(i, j + 1));
            let (lower, lower_next) = (ring(i + 1, j), ring(i + 1, j + 1));
            indices.extend_from_slice(&[upper, upper_next, lower]);
            indices.extend_from_slice(&[upper_next, lower_next, lower]);
        }
    }
    for j in 0..slices {
        indices.extend_from_slice(&[ring(stacks - 1, j), ring(stacks - 1, j + 1), south]);
    }

    (vertices, indices)
}

/// Frustum from z=0 (radius `r1`) to z=height (radius `r2`); a zero radius becomes an apex
fn generate_cone(height: f64, r1: f64, r2: f64, segments: u32) -> Buffers {
    let segments = segments as usize;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let rim = |vertices: &mut Vec<Point3<f64>>, radius: f64, z: f64| -> Vec<usize> {
        if radius.abs() < APEX_EPS {
            vertices.push(Point3::new(0.0, 0.0, z));
            return vec![vertices.len() - 1; segments];
        }
        (0..segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / segments as f64;
                vertices.push(Point3::new(radius * angle.cos(), radius * angle.sin(), z));
                vertices.len() - 1
            })
            .collect()
    };

    let bottom = rim(&mut vertices, r1, 0.0);
    let top = rim(&mut vertices, r2, height);

    if r1.abs() >= APEX_EPS {
        vertices.push(Point3::new(0.0, 0.0, 0.0));
        let center = vertices.len() - 1;
        for i in 0..segments {
            indices.extend_from_slice(&[center, bottom[(i + 1) % segments], bottom[i]]);
        }
    }
    if r2.abs() >= APEX_EPS {
        vertices.push(Point3::new(0.0, 0.0, height));
        let center = vertices.len() - 1;
        for i in 0..segments {
            indices.extend_from_slice(&[center, top[i], top[(i + 1) % segments]]);
        }
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        let (bi, bn, ti, tn) = (bottom[i], bottom[next], top[i], top[next]);
        if bi != bn {
            indices.extend_from_slice(&[bi, bn, ti]);
        }
        if ti != tn {
            indices.extend_from_slice(&[ti, bn, tn]);
        }
    }

    (vertices, indices)
}
