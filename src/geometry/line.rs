// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Infinite 3D lines: plane-pair intersections, edge lines and classification rays

use super::Plane;
use crate::utils::math::dominant_axis;
use nalgebra::{Point3, Vector3};
use rand::Rng;

/// Line through `origin` along the unit vector `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

/// Result of intersecting a line with a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneIntersection {
    /// The line crosses the plane at this point
    Point(Point3<f64>),
    /// The line lies in the plane; its origin is reported
    Contained(Point3<f64>),
}

impl PlaneIntersection {
    pub fn point(&self) -> Point3<f64> {
        match self {
            Self::Point(p) | Self::Contained(p) => *p,
        }
    }
}

impl Line {
    /// Line through `origin` along `direction`; the direction is normalized when possible
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        let direction = direction.try_normalize(0.0).unwrap_or(direction);
        Self { origin, direction }
    }

    /// Line through two points
    pub fn through(a: &Point3<f64>, b: &Point3<f64>) -> Self {
        Self::new(*a, b - a)
    }

    /// Intersection line of two planes, `None` when they are parallel within `tolerance`.
    ///
    /// The origin is found by zeroing the coordinate along which the direction is
    /// largest, which keeps the 2x2 solve well conditioned.
    pub fn from_planes(first: &Plane, second: &Plane, tolerance: f64) -> Option<Self> {
        let direction = first.normal.cross(&second.normal);
        if direction.norm() < tolerance {
            return None;
        }

        let (n1, w1) = (&first.normal, first.distance);
        let (n2, w2) = (&second.normal, second.distance);

        let origin = match dominant_axis(&direction) {
            0 => Point3::new(
                0.0,
                (w1 * n2.z - w2 * n1.z) / direction.x,
                (w2 * n1.y - w1 * n2.y) / direction.x,
            ),
            1 => Point3::new(
                (w2 * n1.z - w1 * n2.z) / direction.y,
                0.0,
                (w1 * n2.x - w2 * n1.x) / direction.y,
            ),
            _ => Point3::new(
                (w1 * n2.y - w2 * n1.y) / direction.z,
                (w2 * n1.x - w1 * n2.x) / direction.z,
                0.0,
            ),
        };

        Some(Self::new(origin, direction))
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Signed distance of the projection of `point` from the origin, along the direction
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.direction)
    }

    /// Meeting point with another line (closest point on `self` for skew input).
    /// `None` when the lines are parallel within `tolerance`.
    pub fn intersect_line(&self, other: &Line, tolerance: f64) -> Option<Point3<f64>> {
        let cross = self.direction.cross(&other.direction);
        let denom = cross.norm_squared();
        if denom < tolerance * tolerance {
            return None;
        }
        let t = (other.origin - self.origin).cross(&other.direction).dot(&cross) / denom;
        Some(self.point_at(t))
    }

    /// Intersection with a plane; `None` when parallel and off the plane
    pub fn intersect_plane(&self, plane: &Plane, tolerance: f64) -> Option<PlaneIntersection> {
        let offset = plane.distance_to(&self.origin);
        let denom = plane.normal.dot(&self.direction);
        if denom.abs() < tolerance {
            return (offset.abs() < tolerance).then_some(PlaneIntersection::Contained(self.origin));
        }
        Some(PlaneIntersection::Point(self.point_at(-offset / denom)))
    }

    /// Nudge the direction by up to `amount` on every axis, then renormalize
    pub fn perturb_direction<R: Rng + ?Sized>(&mut self, rng: &mut R, amount: f64) {
        let offset = Vector3::new(
            amount * rng.gen::<f64>(),
            amount * rng.gen::<f64>(),
            amount * rng.gen::<f64>(),
        );
        let perturbed = self.direction + offset;
        self.direction = perturbed.try_normalize(0.0).unwrap_or(perturbed);
    }
}
