// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat vertex/index triangle mesh exchanged with callers

use super::BoundingBox;
use crate::csg::BooleanOp;
use crate::error::{CsgError, Result};
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Closed triangulated surface: a vertex array plus three indices per face.
///
/// Every index is below the vertex count; the solid is empty iff it has no indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    vertices: Vec<Point3<f64>>,
    indices: Vec<usize>,
}

impl Solid {
    /// Build a solid, checking the index array against the vertex array
    pub fn new(vertices: Vec<Point3<f64>>, indices: Vec<usize>) -> Result<Self> {
        let solid = Self { vertices, indices };
        solid.validate()?;
        Ok(solid)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from flat arrays: 3 coordinates per vertex, 3 indices per triangle
    pub fn from_arrays<I>(coordinates: &[f64], indices: &[I]) -> Result<Self>
    where
        I: Copy + TryInto<usize> + std::fmt::Display,
    {
        if coordinates.len() % 3 != 0 {
            return Err(CsgError::construction(format!(
                "vertex array length {} is not a multiple of 3",
                coordinates.len()
            )));
        }

        let vertices = coordinates
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        let indices = indices
            .iter()
            .map(|&i| {
                i.try_into()
                    .map_err(|_| CsgError::construction(format!("invalid vertex index {}", i)))
            })
            .collect::<Result<Vec<usize>>>()?;

        Self::new(vertices, indices)
    }

    /// Check the array invariants; deserialized solids should be validated before use
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(CsgError::construction(format!(
                "index array length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(CsgError::construction(format!(
                "vertex index {} out of range for {} vertices",
                index,
                self.vertices.len()
            )));
        }
        if let Some(p) = self.vertices.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(CsgError::construction(format!(
                "non-finite vertex {:?}",
                p.coords
            )));
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Flat coordinate array, 3 values per vertex
    pub fn vertex_array(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<usize>) {
        (self.vertices, self.indices)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index triples, one per triangle
    pub fn triangle_indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Corner positions, one triple per triangle
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.triangle_indices()
            .map(|[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Compute bounding box; `None` for a solid without vertices
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices).ok()
    }

    /// Mean of all vertex positions, the pivot for [`Solid::rotate`]
    pub fn mean(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        let offset = Vector3::new(dx, dy, dz);
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Rotate by `dx` radians about the X axis, then `dy` about the Y axis, around the mean
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let pivot = self.mean();
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), dy)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), dx);
        for vertex in &mut self.vertices {
            *vertex = pivot + rotation * (*vertex - pivot);
        }
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        for vertex in &mut self.vertices {
            vertex.x *= sx;
            vertex.y *= sy;
            vertex.z *= sz;
        }
    }

    /// Move along the Z axis (viewer zoom)
    pub fn zoom(&mut self, dz: f64) {
        self.translate(0.0, 0.0, dz);
    }

    /// Transform all vertices by a matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
    }

    /// Perform boolean operation with another solid using the default configuration
    pub fn boolean(&self, other: &Solid, op: BooleanOp) -> Result<Solid> {
        crate::csg::boolean(self, other, op)
    }
}
