// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face splitting along the intersection curve of two graphs

use super::segment::{EndKind, Segment, SegmentEnd};
use super::{Face, FaceId, ObjectGraph, Status, VertexId};
use crate::config::CsgConfig;
use crate::error::{CsgError, Result};
use crate::geometry::{Line, Plane};
use crate::utils::math::sign;
use nalgebra::Point3;
use tracing::trace;

/// Signs of a face's corners against a plane
fn signs_against(face: &Face, plane: &Plane, tolerance: f64) -> [i8; 3] {
    face.points().map(|p| sign(plane.distance_to(&p), tolerance))
}

fn all_equal(signs: [i8; 3]) -> bool {
    signs[0] == signs[1] && signs[1] == signs[2]
}

impl ObjectGraph {
    /// Split faces of `self` until none of them crosses a face of `other`.
    ///
    /// A split face is replaced in place by its first piece and the scan resumes
    /// at the same position, so fresh pieces are tested against every face of
    /// `other` again. Returns the number of splits performed.
    pub fn split_faces(&mut self, other: &ObjectGraph, config: &CsgConfig) -> Result<usize> {
        let tol = config.plane_tolerance;
        let (Some(bound), Some(other_bound)) = (self.bound().copied(), other.bound().copied())
        else {
            return Ok(0);
        };
        if !bound.overlaps(&other_bound, tol) {
            return Ok(0);
        }

        let limit = self.faces.len().max(1).saturating_mul(config.max_split_growth);
        let mut splits = 0;
        let mut i = 0;

        'faces: while i < self.faces.len() {
            if !self.faces[i].bound().overlaps(&other_bound, tol) {
                i += 1;
                continue;
            }

            for other_face in other.faces() {
                let face = &self.faces[i];
                if !face.bound().overlaps(other_face.bound(), tol) {
                    continue;
                }

                // coplanar or fully on one side
                let signs = signs_against(face, other_face.plane(), tol);
                if all_equal(signs) {
                    continue;
                }
                let other_signs = signs_against(other_face, face.plane(), tol);
                if all_equal(other_signs) {
                    continue;
                }

                let Some(line) = Line::from_planes(face.plane(), other_face.plane(), tol) else {
                    trace!(face = i, "planes too close to parallel to intersect");
                    continue;
                };
                let segment = Segment::new(&line, face, signs, tol)?;
                let other_segment = Segment::new(&line, other_face, other_signs, tol)?;
                if !segment.intersects(&other_segment, tol) {
                    continue;
                }

                let original = face.clone();
                if !self.split_face(i, &segment, &other_segment, tol)? {
                    continue;
                }
                if self.faces.len() > limit {
                    return Err(CsgError::SplitLimitExceeded {
                        faces: self.faces.len(),
                        limit,
                    });
                }

                if self.faces.last() == Some(&original) {
                    // the split collapsed back into the original triangle: put it back and move on
                    if let Some(restored) = self.faces.pop() {
                        self.faces.insert(i, restored);
                    }
                    continue;
                }

                splits += 1;
                continue 'faces;
            }

            i += 1;
        }

        Ok(splits)
    }

    /// Replace face `index` by the pieces cut out by `segment` (this face) and
    /// `other` (the crossing face). Returns false when nothing had to be cut.
    fn split_face(
        &mut self,
        index: FaceId,
        segment: &Segment,
        other: &Segment,
        tol: f64,
    ) -> Result<bool> {
        let start_vertex = segment.start.vertex;
        let end_vertex = segment.end.vertex;
        let middle = segment.middle;

        // the cut runs over the overlap of both segments
        let cut = Segment {
            start: if other.start.distance > segment.start.distance + tol {
                SegmentEnd {
                    kind: middle,
                    vertex: start_vertex,
                    ..other.start
                }
            } else {
                segment.start
            },
            end: if other.end.distance < segment.end.distance - tol {
                SegmentEnd {
                    kind: middle,
                    vertex: end_vertex,
                    ..other.end
                }
            } else {
                segment.end
            },
            middle,
        };
        let (start_kind, start_pos) = (cut.start.kind, cut.start.position);
        let (end_kind, end_pos) = (cut.end.kind, cut.end.position);

        if start_kind == EndKind::Vertex {
            self.vertices[start_vertex].status = Status::Boundary;
        }
        if end_kind == EndKind::Vertex {
            self.vertices[end_vertex].status = Status::Boundary;
        }

        let face = &self.faces[index];
        let corner = |v: VertexId| {
            face.corner_of(v).ok_or_else(|| {
                CsgError::degenerate(format!(
                    "segment vertex {} is not a corner of face {} {:?}",
                    v,
                    index,
                    face.vertices()
                ))
            })
        };

        match (start_kind, middle, end_kind) {
            (EndKind::Vertex, _, EndKind::Vertex) => return Ok(false),
            (_, EndKind::Edge, _) => {
                let (cs, ce) = (corner(start_vertex)?, corner(end_vertex)?);
                // two distinct corners of a triangle always share an edge
                let forward = (cs + 1) % 3 == ce;
                let edge = if forward { cs } else { ce };

                if start_kind == EndKind::Vertex {
                    self.break_in_two(index, end_pos, edge);
                } else if end_kind == EndKind::Vertex || cut.is_point(tol) {
                    self.break_in_two(index, start_pos, edge);
                } else if forward {
                    self.break_in_three_along_edge(index, start_pos, end_pos, edge);
                } else {
                    self.break_in_three_along_edge(index, end_pos, start_pos, edge);
                }
            }
            (EndKind::Vertex, _, EndKind::Edge) => {
                let c = corner(end_vertex)?;
                self.break_in_two(index, end_pos, c);
            }
            (EndKind::Edge, _, EndKind::Vertex) => {
                let c = corner(start_vertex)?;
                self.break_in_two(index, start_pos, c);
            }
            (EndKind::Vertex, _, EndKind::Face) => {
                let c = corner(start_vertex)?;
                self.break_in_fan(index, end_pos, c);
            }
            (EndKind::Face, _, EndKind::Vertex) => {
                let c = corner(end_vertex)?;
                self.break_in_fan(index, start_pos, c);
            }
            (EndKind::Edge, _, EndKind::Edge) => {
                let (cs, ce) = (corner(start_vertex)?, corner(end_vertex)?);
                self.break_in_three_across(index, start_pos, end_pos, cs, ce);
            }
            (EndKind::Edge, _, EndKind::Face) => {
                let c = corner(start_vertex)?;
                self.break_in_four(index, start_pos, end_pos, c);
            }
            (EndKind::Face, _, EndKind::Edge) => {
                let c = corner(end_vertex)?;
                self.break_in_four(index, end_pos, start_pos, c);
            }
            (EndKind::Face, _, EndKind::Face) => {
                if cut.is_point(tol) {
                    self.break_in_fan(index, start_pos, 0);
                    return Ok(true);
                }

                // corner most in line with the cut
                let direction = start_pos - end_pos;
                let points = *face.points();
                let alignment = points.map(|p| {
                    (end_pos - p)
                        .try_normalize(0.0)
                        .map_or(0.0, |d| direction.dot(&d).abs())
                });
                let lined = if alignment[0] > alignment[1] && alignment[0] > alignment[2] {
                    0
                } else if alignment[1] > alignment[2] && alignment[1] > alignment[0] {
                    1
                } else {
                    2
                };

                let lined_pos = points[lined];
                if (lined_pos - start_pos).norm() > (lined_pos - end_pos).norm() {
                    self.break_in_five(index, start_pos, end_pos, lined);
                } else {
                    self.break_in_five(index, end_pos, start_pos, lined);
                }
            }
        }
        Ok(true)
    }

    /// New vertex on edge a -> b: (a, p, c), (p, b, c)
    fn break_in_two(&mut self, index: FaceId, position: Point3<f64>, edge: usize) {
        let [a, b, c] = self.faces.remove(index).rotated(edge);
        let p = self.add_vertex(position, Status::Boundary);
        self.add_face(a, p, c);
        self.add_face(p, b, c);
    }

    /// Two new vertices along edge a -> b, `first` nearer to a
    fn break_in_three_along_edge(
        &mut self,
        index: FaceId,
        first: Point3<f64>,
        second: Point3<f64>,
        edge: usize,
    ) {
        let [a, b, c] = self.faces.remove(index).rotated(edge);
        let p1 = self.add_vertex(first, Status::Boundary);
        let p2 = self.add_vertex(second, Status::Boundary);
        self.add_face(a, p1, c);
        self.add_face(p1, p2, c);
        self.add_face(p2, b, c);
    }

    /// Interior vertex joined to all three corners
    fn break_in_fan(&mut self, index: FaceId, position: Point3<f64>, corner: usize) {
        let [a, b, c] = self.faces.remove(index).rotated(corner);
        let p = self.add_vertex(position, Status::Boundary);
        self.add_face(a, b, p);
        self.add_face(b, c, p);
        self.add_face(c, a, p);
    }

    /// Cut from the edge starting at corner `start_edge` to the edge starting at `end_edge`
    fn break_in_three_across(
        &mut self,
        index: FaceId,
        start: Point3<f64>,
        end: Point3<f64>,
        start_edge: usize,
        end_edge: usize,
    ) {
        let face = self.faces.remove(index);
        let start_vertex = self.add_vertex(start, Status::Boundary);
        let end_vertex = self.add_vertex(end, Status::Boundary);

        // rotate so the cut goes from edge a -> b to edge b -> c
        let (corner, first, second) = if (start_edge + 1) % 3 == end_edge {
            (start_edge, start_vertex, end_vertex)
        } else {
            (end_edge, end_vertex, start_vertex)
        };
        let [a, b, c] = face.rotated(corner);
        self.add_face(a, first, second);
        self.add_face(a, second, c);
        self.add_face(first, b, second);
    }

    /// `on_edge` lies on edge a -> b, `inner` inside the face
    fn break_in_four(
        &mut self,
        index: FaceId,
        on_edge: Point3<f64>,
        inner: Point3<f64>,
        edge: usize,
    ) {
        let [a, b, c] = self.faces.remove(index).rotated(edge);
        let p1 = self.add_vertex(on_edge, Status::Boundary);
        let p2 = self.add_vertex(inner, Status::Boundary);
        self.add_face(a, p1, p2);
        self.add_face(p1, b, p2);
        self.add_face(b, c, p2);
        self.add_face(c, a, p2);
    }

    /// Both cut ends inside the face, roughly in line with corner `lined`
    fn break_in_five(
        &mut self,
        index: FaceId,
        far: Point3<f64>,
        near: Point3<f64>,
        lined: usize,
    ) {
        let [a, b, c] = self.faces.remove(index).rotated(lined);
        let p1 = self.add_vertex(far, Status::Boundary);
        let p2 = self.add_vertex(near, Status::Boundary);
        self.add_face(b, c, p1);
        self.add_face(b, p1, p2);
        self.add_face(c, p2, p1);
        self.add_face(b, p2, a);
        self.add_face(c, a, p2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{analytics, Primitive, Solid};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn graph(solid: &Solid) -> ObjectGraph {
        ObjectGraph::new(solid, &CsgConfig::default()).unwrap()
    }

    fn area(graph: &ObjectGraph) -> f64 {
        graph.faces().iter().map(Face::area).sum()
    }

    fn unit_cube(offset: f64) -> Solid {
        let mut cube = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_solid().unwrap();
        cube.translate(offset, offset, offset);
        cube
    }

    #[test]
    fn test_overlapping_cubes_split_and_keep_area() {
        let config = CsgConfig::default();
        let mut a = graph(&unit_cube(0.0));
        let b = graph(&unit_cube(0.5));

        let splits = a.split_faces(&b, &config).unwrap();
        assert!(splits > 0);
        assert!(a.face_count() > 12);
        assert_relative_eq!(area(&a), 6.0, epsilon = 1e-9);
        assert!(a.vertices().iter().any(|v| v.status == Status::Boundary));
    }

    #[test]
    fn test_split_is_a_closure() {
        let config = CsgConfig::default();
        let mut a = graph(&unit_cube(0.0));
        let b = graph(&unit_cube(0.5));
        a.split_faces(&b, &config).unwrap();
        let faces = a.face_count();

        // a second pass finds nothing left to cut
        assert_eq!(a.split_faces(&b, &config).unwrap(), 0);
        assert_eq!(a.face_count(), faces);
    }

    #[test]
    fn test_split_preserves_winding() {
        let config = CsgConfig::default();
        let mut a = graph(&Primitive::sphere(1.0, 12).to_solid().unwrap());
        let b = graph(&unit_cube(0.2));
        a.split_faces(&b, &config).unwrap();

        let before = analytics::signed_volume(&Primitive::sphere(1.0, 12).to_solid().unwrap());
        let positions: Vec<_> = a.vertices().iter().map(|v| v.position).collect();
        let indices: Vec<usize> = a.faces().iter().flat_map(|f| f.vertices()).collect();
        let split = Solid::new(positions, indices).unwrap();
        assert_relative_eq!(analytics::signed_volume(&split), before, epsilon = 1e-6);
    }

    #[test]
    fn test_disjoint_graphs_are_untouched() {
        let config = CsgConfig::default();
        let mut a = graph(&unit_cube(0.0));
        let b = graph(&unit_cube(3.0));
        assert_eq!(a.split_faces(&b, &config).unwrap(), 0);
        assert_eq!(a.face_count(), 12);
    }

    #[test]
    fn test_growth_limit() {
        let config = CsgConfig {
            max_split_growth: 1,
            ..CsgConfig::default()
        };
        let mut a = graph(&unit_cube(0.0));
        let b = graph(&unit_cube(0.5));
        let result = a.split_faces(&b, &config);
        assert!(matches!(result, Err(CsgError::SplitLimitExceeded { limit: 12, .. })));
    }

    #[test]
    fn test_partial_cut_breaks_in_four() {
        // a perpendicular wall enters through one edge and stops inside the triangle
        let mut a = graph(
            &Solid::from_arrays(&[0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0], &[0u32, 1, 2]).unwrap(),
        );
        let wall = graph(
            &Solid::from_arrays(
                &[1.0, -1.0, -1.0, 1.0, 5.0, -1.0, 1.0, -1.0, 1.0],
                &[0u32, 1, 2],
            )
            .unwrap(),
        );
        // the wall meets z = 0 for y in [-1, 2], the triangle spans y in [0, 3] at x = 1
        let config = CsgConfig::default();
        assert_eq!(a.split_faces(&wall, &config).unwrap(), 1);
        assert_eq!(a.face_count(), 4);
        assert_relative_eq!(area(&a), 8.0, epsilon = 1e-9);
    }

    fn end(kind: EndKind, vertex: VertexId, x: f64) -> SegmentEnd {
        SegmentEnd {
            kind,
            vertex,
            position: Point3::new(x, 0.0, 0.0),
            distance: x,
        }
    }

    fn flat_triangle() -> ObjectGraph {
        graph(&Solid::from_arrays(&[0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0], &[0u32, 1, 2]).unwrap())
    }

    #[test]
    fn test_segment_vertex_off_the_face_is_an_error() {
        let mut a = flat_triangle();
        // vertex 7 is not a corner of the only face
        let segment = Segment {
            start: end(EndKind::Vertex, 0, 0.0),
            end: end(EndKind::Edge, 7, 2.0),
            middle: EndKind::Face,
        };
        let result = a.split_face(0, &segment, &segment.clone(), 1e-10);
        assert!(matches!(result, Err(CsgError::DegenerateGeometry { .. })));
        assert_eq!(a.face_count(), 1);
    }

    #[test]
    fn test_collapsed_cut_along_an_edge_breaks_in_two() {
        let mut a = flat_triangle();
        let segment = Segment {
            start: end(EndKind::Vertex, 0, 0.0),
            end: end(EndKind::Vertex, 1, 4.0),
            middle: EndKind::Edge,
        };
        // the crossing face only covers a point of edge 0 -> 1, a hair under the tolerance wide
        let other = Segment {
            start: end(EndKind::Face, 0, 2.0),
            end: end(EndKind::Face, 0, 2.0 + 1e-11),
            middle: EndKind::Face,
        };
        assert!(a.split_face(0, &segment, &other, 1e-10).unwrap());
        assert_eq!(a.face_count(), 2);
        assert_eq!(a.vertices().len(), 4);
        assert_relative_eq!(area(&a), 8.0, epsilon = 1e-9);
        assert_relative_eq!(a.vertices()[3].position, Point3::new(2.0, 0.0, 0.0), epsilon = 1e-9);
    }
}
