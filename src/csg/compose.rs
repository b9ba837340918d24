// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output assembly from classified faces

use super::weld::PointWelder;
use super::{BooleanOp, Face, ObjectGraph, Status};
use crate::error::Result;
use crate::geometry::Solid;
use crate::utils::math::points_equal;
use nalgebra::Point3;
use tracing::trace;

/// Which faces of each graph survive an operation
struct Selection {
    first: &'static [Status],
    second: &'static [Status],
    invert_second: bool,
}

fn selection(op: BooleanOp) -> Selection {
    match op {
        BooleanOp::Union => Selection {
            first: &[Status::Outside, Status::Same],
            second: &[Status::Outside],
            invert_second: false,
        },
        BooleanOp::Intersection => Selection {
            first: &[Status::Inside, Status::Same],
            second: &[Status::Inside],
            invert_second: false,
        },
        BooleanOp::Difference => Selection {
            first: &[Status::Outside, Status::Opposite],
            second: &[Status::Inside],
            invert_second: true,
        },
    }
}

/// Collects triangles into a deduplicated vertex list
struct Assembler {
    welder: PointWelder,
    indices: Vec<usize>,
    tolerance: f64,
}

impl Assembler {
    fn new(tolerance: f64) -> Self {
        Self {
            welder: PointWelder::new(tolerance),
            indices: Vec::new(),
            tolerance,
        }
    }

    fn push(&mut self, points: [Point3<f64>; 3]) {
        let tol = self.tolerance;
        if points_equal(&points[0], &points[1], tol)
            || points_equal(&points[1], &points[2], tol)
            || points_equal(&points[0], &points[2], tol)
        {
            trace!("dropping collapsed output triangle");
            return;
        }

        let ids = points.map(|p| self.welder.find_or_insert(p).0);
        if ids[0] == ids[1] || ids[1] == ids[2] || ids[0] == ids[2] {
            trace!(?ids, "dropping output triangle with welded corners");
            return;
        }
        self.indices.extend_from_slice(&ids);
    }

    fn push_faces(&mut self, faces: &[Face], keep: &[Status], invert: bool) {
        for face in faces.iter().filter(|f| keep.contains(&f.status)) {
            let [a, b, c] = *face.points();
            if invert {
                self.push([b, a, c]);
            } else {
                self.push([a, b, c]);
            }
        }
    }

    fn finish(self) -> Result<Solid> {
        if self.indices.is_empty() {
            return Ok(Solid::empty());
        }
        Solid::new(self.welder.into_points(), self.indices)
    }
}

/// Assemble the result of `op` from two classified graphs; neither graph is modified
pub fn compose(
    first: &ObjectGraph,
    second: &ObjectGraph,
    op: BooleanOp,
    vertex_tolerance: f64,
) -> Result<Solid> {
    let keep = selection(op);
    let mut assembler = Assembler::new(vertex_tolerance);
    assembler.push_faces(first.faces(), keep.first, false);
    assembler.push_faces(second.faces(), keep.second, keep.invert_second);
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-5;

    #[test]
    fn test_assembler_welds_shared_corners() {
        let mut assembler = Assembler::new(TOL);
        assembler.push([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assembler.push([
            Point3::new(1.0 + 1e-7, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let solid = assembler.finish().unwrap();
        assert_eq!(solid.vertex_count(), 4);
        assert_eq!(solid.indices(), &[0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_assembler_drops_collapsed_triangles() {
        let mut assembler = Assembler::new(TOL);
        assembler.push([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-7, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let solid = assembler.finish().unwrap();
        assert!(solid.is_empty());
        assert_eq!(solid, Solid::empty());
    }

    #[test]
    fn test_difference_keeps_opposite_and_inverts_second() {
        let keep = selection(BooleanOp::Difference);
        assert!(keep.first.contains(&Status::Opposite));
        assert!(!keep.first.contains(&Status::Same));
        assert!(keep.invert_second);

        let union = selection(BooleanOp::Union);
        assert!(union.first.contains(&Status::Same));
        assert!(!union.second.contains(&Status::Same));
    }
}
