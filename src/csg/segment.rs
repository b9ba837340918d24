// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segments: where a face crosses the intersection line of two planes

use super::{Face, VertexId};
use crate::error::{CsgError, Result};
use crate::geometry::Line;
use nalgebra::Point3;

/// What a segment end (or the stretch between the ends) touches on its face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndKind {
    Vertex,
    Edge,
    Face,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEnd {
    pub kind: EndKind,
    /// The vertex itself for a VERTEX end, the first vertex of the crossed edge for an EDGE end
    pub vertex: VertexId,
    pub position: Point3<f64>,
    /// Signed distance along the intersection line
    pub distance: f64,
}

/// Interval of the intersection line covered by one face, with `start.distance <= end.distance`
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: SegmentEnd,
    pub end: SegmentEnd,
    pub middle: EndKind,
}

impl Segment {
    /// Build the segment of `face` on `line` from the signs of its corners against the other plane.
    ///
    /// The signs must not all be equal: such a face does not cross the line.
    pub fn new(line: &Line, face: &Face, signs: [i8; 3], tolerance: f64) -> Result<Self> {
        let vertices = face.vertices();
        let points = face.points();
        let mut ends: Vec<SegmentEnd> = Vec::with_capacity(2);

        for i in 0..3 {
            if signs[i] != 0 {
                continue;
            }
            let end = SegmentEnd {
                kind: EndKind::Vertex,
                vertex: vertices[i],
                position: points[i],
                distance: line.signed_distance(&points[i]),
            };
            push_end(&mut ends, end);
            // the other two corners on the same side: the line only touches this corner
            if signs[(i + 1) % 3] == signs[(i + 2) % 3] {
                push_end(&mut ends, end);
            }
        }

        if ends.len() < 2 {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                if signs[a] * signs[b] != -1 {
                    continue;
                }
                let edge = Line::through(&points[a], &points[b]);
                let position = line.intersect_line(&edge, tolerance).ok_or_else(|| {
                    CsgError::degenerate(format!(
                        "edge {:?} -> {:?} does not meet the intersection line",
                        points[a].coords, points[b].coords
                    ))
                })?;
                push_end(
                    &mut ends,
                    SegmentEnd {
                        kind: EndKind::Edge,
                        vertex: vertices[a],
                        position,
                        distance: line.signed_distance(&position),
                    },
                );
            }
        }

        let [start, end] = <[SegmentEnd; 2]>::try_from(ends).map_err(|ends| {
            CsgError::degenerate(format!(
                "face crossing produced {} segment ends for signs {:?}",
                ends.len(),
                signs
            ))
        })?;

        let middle = if start.kind == EndKind::Edge || end.kind == EndKind::Edge {
            EndKind::Face
        } else if start.vertex == end.vertex {
            EndKind::Vertex
        } else {
            EndKind::Edge
        };

        let mut segment = Self { start, end, middle };
        if segment.start.distance > segment.end.distance {
            std::mem::swap(&mut segment.start, &mut segment.end);
        }
        Ok(segment)
    }

    /// Whether the two intervals share more than a touching point
    pub fn intersects(&self, other: &Segment, tolerance: f64) -> bool {
        !(self.end.distance < other.start.distance + tolerance
            || other.end.distance < self.start.distance + tolerance)
    }

    /// Collapsed to a single point
    pub fn is_point(&self, tolerance: f64) -> bool {
        (self.end.distance - self.start.distance).abs() < tolerance
    }
}

fn push_end(ends: &mut Vec<SegmentEnd>, end: SegmentEnd) {
    if ends.len() < 2 {
        ends.push(end);
    }
}
