// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Graph vertices and the classification status they share with faces

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a vertex inside one [`super::ObjectGraph`]
pub type VertexId = usize;

/// Position of a face or vertex relative to the other solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not classified yet
    #[default]
    Unknown,
    Inside,
    Outside,
    /// Coincident with a face of the other solid, normals agreeing
    Same,
    /// Coincident with a face of the other solid, normals opposing
    Opposite,
    /// Lies on the intersection curve between the solids
    Boundary,
}

impl Status {
    /// Inside and Outside are the only statuses that flood across vertices
    pub fn is_volumetric(self) -> bool {
        matches!(self, Status::Inside | Status::Outside)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Unknown => "unknown",
            Status::Inside => "inside",
            Status::Outside => "outside",
            Status::Same => "same",
            Status::Opposite => "opposite",
            Status::Boundary => "boundary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub status: Status,
    /// Neighbours along face edges, without duplicates
    adjacent: Vec<VertexId>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, status: Status) -> Self {
        Self {
            position,
            status,
            adjacent: Vec::new(),
        }
    }

    pub fn adjacent(&self) -> &[VertexId] {
        &self.adjacent
    }

    /// Record an undirected edge to `other`; repeated calls are no-ops
    pub fn add_adjacent(&mut self, other: VertexId) {
        if !self.adjacent.contains(&other) {
            self.adjacent.push(other);
        }
    }

    pub fn clear_adjacent(&mut self) {
        self.adjacent.clear();
    }
}

/// Set `start` to `status` and flood it across every connected Unknown vertex.
///
/// Already classified vertices (Boundary in particular) stop the fill.
pub fn mark(vertices: &mut [Vertex], start: VertexId, status: Status) {
    vertices[start].status = status;
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        for i in 0..vertices[current].adjacent.len() {
            let next = vertices[current].adjacent[i];
            if vertices[next].status == Status::Unknown {
                vertices[next].status = status;
                stack.push(next);
            }
        }
    }
}
