// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-evaluation vertex/face graph built from a private copy of one solid

use super::weld::PointWelder;
use super::{mark, Face, FaceId, Status, Vertex, VertexId};
use crate::config::CsgConfig;
use crate::error::{CsgError, Result};
use crate::geometry::{BoundingBox, Solid};
use crate::utils::math::points_equal;
use nalgebra::Point3;
use tracing::trace;

/// Arena of vertices addressed by [`VertexId`] plus the face list over them
#[derive(Debug, Clone)]
pub struct ObjectGraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    bound: Option<BoundingBox>,
    welder: PointWelder,
    vertex_tolerance: f64,
    plane_tolerance: f64,
}

impl ObjectGraph {
    /// Copy `solid` into a fresh graph, welding vertices closer than the vertex tolerance.
    ///
    /// Input triangles whose corners weld together or span no plane are rejected.
    pub fn new(solid: &Solid, config: &CsgConfig) -> Result<Self> {
        // deserialized solids never went through `Solid::new`
        solid.validate()?;

        let mut graph = Self {
            vertices: Vec::with_capacity(solid.vertex_count()),
            faces: Vec::with_capacity(solid.triangle_count()),
            bound: solid.bounding_box(),
            welder: PointWelder::new(config.vertex_tolerance),
            vertex_tolerance: config.vertex_tolerance,
            plane_tolerance: config.plane_tolerance,
        };

        let ids: Vec<VertexId> = solid
            .vertices()
            .iter()
            .map(|p| graph.add_vertex(*p, Status::Unknown))
            .collect();

        for [a, b, c] in solid.triangle_indices() {
            let corners = [ids[a], ids[b], ids[c]];
            if corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2] {
                return Err(CsgError::degenerate(format!(
                    "triangle ({}, {}, {}) has coincident corners",
                    a, b, c
                )));
            }
            let points = corners.map(|v| graph.vertices[v].position);
            let face = Face::new(corners, points)?;
            if face.area() > graph.plane_tolerance {
                graph.faces.push(face);
            } else {
                trace!(a, b, c, "dropping sliver input triangle");
            }
        }

        Ok(graph)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Bound of the input solid; `None` when it had no vertices
    pub fn bound(&self) -> Option<&BoundingBox> {
        self.bound.as_ref()
    }

    pub fn position(&self, vertex: VertexId) -> Point3<f64> {
        self.vertices[vertex].position
    }

    /// Reuse a vertex equal to `position` within tolerance, or append one.
    ///
    /// A reused vertex takes the requested status.
    pub fn add_vertex(&mut self, position: Point3<f64>, status: Status) -> VertexId {
        let (id, inserted) = self.welder.find_or_insert(position);
        if inserted {
            self.vertices.push(Vertex::new(position, status));
        } else {
            self.vertices[id].status = status;
        }
        id
    }

    /// Append a face unless its corners coincide or its area is within tolerance
    pub fn add_face(&mut self, v1: VertexId, v2: VertexId, v3: VertexId) -> Option<FaceId> {
        let points = [self.position(v1), self.position(v2), self.position(v3)];
        let tol = self.vertex_tolerance;
        if points_equal(&points[0], &points[1], tol)
            || points_equal(&points[1], &points[2], tol)
            || points_equal(&points[0], &points[2], tol)
        {
            trace!(v1, v2, v3, "skipping face with coincident corners");
            return None;
        }

        let face = Face::new([v1, v2, v3], points).ok()?;
        if face.area() <= self.plane_tolerance {
            trace!(v1, v2, v3, area = face.area(), "skipping sliver face");
            return None;
        }
        self.faces.push(face);
        Some(self.faces.len() - 1)
    }

    /// Wire every face edge into the vertex adjacency sets, replacing any previous wiring
    pub fn rebuild_adjacency(&mut self) {
        for vertex in &mut self.vertices {
            vertex.clear_adjacent();
        }
        for face in &self.faces {
            let [a, b, c] = face.vertices();
            for (from, to) in [(a, b), (b, c), (c, a)] {
                self.vertices[from].add_adjacent(to);
                self.vertices[to].add_adjacent(from);
            }
        }
    }

    /// Flood `status` from `vertex` through the adjacency graph
    pub fn mark(&mut self, vertex: VertexId, status: Status) {
        mark(&mut self.vertices, vertex, status);
    }
}
