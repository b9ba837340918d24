// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangular faces with their derived geometry

use super::{Status, Vertex, VertexId};
use crate::error::Result;
use crate::geometry::{BoundingBox, Plane};
use crate::utils::math::{dominant_axis, triangle_area};
use nalgebra::{Point3, Vector3};

/// Stable index of a face inside one [`super::ObjectGraph`] face list
pub type FaceId = usize;

/// Triangle over three graph vertices; the winding defines the outward normal.
///
/// Plane, bound, centroid and area are computed once at construction. Vertex
/// positions never move during an evaluation, so they stay valid until the
/// face is inverted or replaced by a split.
#[derive(Debug, Clone)]
pub struct Face {
    vertices: [VertexId; 3],
    points: [Point3<f64>; 3],
    plane: Plane,
    bound: BoundingBox,
    centroid: Point3<f64>,
    area: f64,
    pub status: Status,
}

/// Where a point sits against one projected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSide {
    Up,
    Down,
    On,
    None,
}

impl Face {
    /// Build a face; fails with a degenerate-geometry error when the corners span no plane
    pub fn new(vertices: [VertexId; 3], points: [Point3<f64>; 3]) -> Result<Self> {
        let plane = Plane::from_points(&points[0], &points[1], &points[2])?;
        Ok(Self {
            vertices,
            points,
            plane,
            bound: BoundingBox::from_triangle(&points[0], &points[1], &points[2]),
            centroid: Point3::from((points[0].coords + points[1].coords + points[2].coords) / 3.0),
            area: triangle_area(&points[0], &points[1], &points[2]),
            status: Status::Unknown,
        })
    }

    pub fn vertices(&self) -> [VertexId; 3] {
        self.vertices
    }

    pub fn points(&self) -> &[Point3<f64>; 3] {
        &self.points
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal(&self) -> &Vector3<f64> {
        &self.plane.normal
    }

    pub fn bound(&self) -> &BoundingBox {
        &self.bound
    }

    pub fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Swap the first two corners, flipping winding and normal
    pub fn invert(&mut self) {
        self.vertices.swap(0, 1);
        self.points.swap(0, 1);
        self.plane = self.plane.flipped();
    }

    /// Corner index (0..3) holding `vertex`
    pub fn corner_of(&self, vertex: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// Corners rotated so `corner` comes first, winding preserved
    pub fn rotated(&self, corner: usize) -> [VertexId; 3] {
        [
            self.vertices[corner % 3],
            self.vertices[(corner + 1) % 3],
            self.vertices[(corner + 2) % 3],
        ]
    }

    /// Adopt Inside/Outside from any corner that already carries it
    pub fn simple_classify(&mut self, vertices: &[Vertex]) -> bool {
        let known = self
            .vertices
            .iter()
            .map(|&v| vertices[v].status)
            .find(|s| s.is_volumetric());

        match known {
            Some(status) => {
                self.status = status;
                true
            }
            None => false,
        }
    }

    /// Whether `point`, assumed to lie in this face's plane, is inside the triangle or on its border.
    ///
    /// The test runs in the coordinate plane that drops the normal's dominant axis.
    pub fn contains_point(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let (u, w) = match dominant_axis(&self.plane.normal) {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };

        let mut up = false;
        let mut down = false;
        for i in 0..3 {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % 3];
            match edge_side(point, a, b, u, w, tolerance) {
                EdgeSide::On => return true,
                EdgeSide::Up => up = true,
                EdgeSide::Down => down = true,
                EdgeSide::None => {}
            }
        }
        up && down
    }
}

/// Classify `point` against edge `a -> b` by comparing along the `w` axis
/// where the edge spans the point's `u` coordinate.
fn edge_side(
    point: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    u: usize,
    w: usize,
    tolerance: f64,
) -> EdgeSide {
    let span = b[u] - a[u];
    let within = (point[u] >= a[u] && point[u] <= b[u]) || (point[u] <= a[u] && point[u] >= b[u]);
    if span.abs() <= tolerance || !within {
        return EdgeSide::None;
    }

    let slope = (b[w] - a[w]) / span;
    let edge_w = a[w] + slope * (point[u] - a[u]);
    if edge_w > point[w] + tolerance {
        EdgeSide::Up
    } else if edge_w < point[w] - tolerance {
        EdgeSide::Down
    } else {
        EdgeSide::On
    }
}

impl PartialEq for Face {
    /// Same triangle under any cyclic rotation of the corners
    fn eq(&self, other: &Self) -> bool {
        let [a, b, c] = self.vertices;
        [[a, b, c], [b, c, a], [c, a, b]].contains(&other.vertices)
    }
}
