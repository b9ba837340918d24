// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face classification: vertex statuses first, ray casting as the fallback

use super::{Face, ObjectGraph, Status};
use crate::config::CsgConfig;
use crate::error::{CsgError, Result};
use crate::geometry::{Line, Ray};
use rand::Rng;
use tracing::debug;

/// Result of ray-tracing one face against the other graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayCast {
    pub status: Status,
    /// Casts made, including the first unperturbed one
    pub casts: usize,
}

enum CastResult {
    /// The ray lies in a plane of the other graph and must be perturbed
    InPlane,
    /// Closest face hit: signed distance along the ray and normal·direction
    Hit { distance: f64, dot: f64 },
    Miss,
}

impl ObjectGraph {
    /// Classify every face of `self` against `other`.
    ///
    /// Adjacency is rebuilt from the current faces first so that ray results can
    /// flood through connected vertices. Returns how many faces needed a ray cast.
    pub fn classify_faces<R: Rng + ?Sized>(
        &mut self,
        other: &ObjectGraph,
        config: &CsgConfig,
        rng: &mut R,
    ) -> Result<usize> {
        self.rebuild_adjacency();

        let mut traced = 0;
        for i in 0..self.faces.len() {
            if self.faces[i].simple_classify(&self.vertices) {
                continue;
            }

            let cast = ray_trace(&self.faces[i], other, config, &mut *rng)?;
            traced += 1;
            self.faces[i].status = cast.status;

            // coincidence is a face fact, only volume statuses spread to vertices
            if cast.status.is_volumetric() {
                for v in self.faces[i].vertices() {
                    if self.vertices[v].status == Status::Unknown {
                        self.mark(v, cast.status);
                    }
                }
            }
        }

        Ok(traced)
    }
}

/// Cast a ray from the face centroid along its normal and classify by the closest face hit.
///
/// A ray lying in a plane of `other` is perturbed and recast, at most
/// `max_ray_attempts` times.
pub fn ray_trace<R: Rng + ?Sized>(
    face: &Face,
    other: &ObjectGraph,
    config: &CsgConfig,
    rng: &mut R,
) -> Result<RayCast> {
    let tol = config.plane_tolerance;
    let mut line = Line::new(face.centroid(), *face.normal());
    let mut casts = 0;

    loop {
        casts += 1;
        let status = match cast(&line, other, config) {
            CastResult::InPlane => {
                if casts > config.max_ray_attempts {
                    return Err(CsgError::ClassificationStall { attempts: casts });
                }
                debug!(attempt = casts, "ray lies in a face plane, perturbing");
                line.perturb_direction(&mut *rng, config.perturbation);
                continue;
            }
            CastResult::Miss => Status::Outside,
            CastResult::Hit { distance, dot } if distance.abs() < tol => {
                if dot > 0.0 {
                    Status::Same
                } else {
                    Status::Opposite
                }
            }
            CastResult::Hit { dot, .. } => {
                if dot > 0.0 {
                    Status::Inside
                } else {
                    Status::Outside
                }
            }
        };
        return Ok(RayCast { status, casts });
    }
}

fn cast(line: &Line, other: &ObjectGraph, config: &CsgConfig) -> CastResult {
    let tol = config.plane_tolerance;
    let mut ray = Ray::with_window(line.origin, line.direction, -tol, f64::INFINITY);
    let mut closest: Option<(f64, f64)> = None;

    for face in other.faces() {
        if !ray.intersects_box(&face.bound().expanded(config.vertex_tolerance)) {
            continue;
        }

        let Some(intersection) = line.intersect_plane(face.plane(), tol) else {
            continue;
        };
        let point = intersection.point();
        let distance = line.signed_distance(&point);
        let dot = face.normal().dot(&line.direction);

        if distance.abs() < tol {
            if dot.abs() < tol {
                return CastResult::InPlane;
            }
            if face.contains_point(&point, tol) {
                // starts on this face
                closest = Some((0.0, dot));
                break;
            }
        } else if dot.abs() > tol
            && distance > tol
            && closest.map_or(true, |(best, _)| distance < best)
            && face.contains_point(&point, tol)
        {
            closest = Some((distance, dot));
            ray.max_distance = distance + tol;
        }
    }

    match closest {
        Some((distance, dot)) => CastResult::Hit { distance, dot },
        None => CastResult::Miss,
    }
}
