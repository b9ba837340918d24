// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rays with precomputed slab-test data

use super::BoundingBox;
use nalgebra::{Point3, Vector3};

/// Direction components below this are treated as parallel to an axis slab
const AXIS_EPS: f64 = 1e-12;

/// Half-line `origin + t * direction` restricted to `[min_distance, max_distance]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    /// Unit direction
    pub direction: Vector3<f64>,
    pub min_distance: f64,
    pub max_distance: f64,
    inv_direction: Vector3<f64>,
    /// Per axis: 1 when the direction is negative, 0 otherwise
    sign: [usize; 3],
}

impl Ray {
    /// Ray over `[0, +inf)`; the direction is normalized
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self::with_window(origin, direction, 0.0, f64::INFINITY)
    }

    pub fn with_window(
        origin: Point3<f64>,
        direction: Vector3<f64>,
        min_distance: f64,
        max_distance: f64,
    ) -> Self {
        let direction = direction.try_normalize(0.0).unwrap_or(direction);
        let inv_direction = direction.map(|d| 1.0 / d);
        let sign = [
            (inv_direction.x < 0.0) as usize,
            (inv_direction.y < 0.0) as usize,
            (inv_direction.z < 0.0) as usize,
        ];
        Self {
            origin,
            direction,
            min_distance,
            max_distance,
            inv_direction,
            sign,
        }
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Slab test against `bounds`, accepted only if the hit interval meets the ray window
    pub fn intersects_box(&self, bounds: &BoundingBox) -> bool {
        let mut near = f64::NEG_INFINITY;
        let mut far = f64::INFINITY;

        for axis in 0..3 {
            if self.direction[axis].abs() < AXIS_EPS {
                // parallel to this slab: inside it or never
                let o = self.origin[axis];
                if o < bounds.min[axis] || o > bounds.max[axis] {
                    return false;
                }
                continue;
            }

            let s = self.sign[axis];
            let axis_near = (bounds.corner(s)[axis] - self.origin[axis]) * self.inv_direction[axis];
            let axis_far = (bounds.corner(1 - s)[axis] - self.origin[axis]) * self.inv_direction[axis];

            if near > axis_far || axis_near > far {
                return false;
            }
            near = near.max(axis_near);
            far = far.min(axis_far);
        }

        near < self.max_distance && far > self.min_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn test_ray_hits_box() {
        let ray = Ray::new(Point3::new(-1.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray.intersects_box(&unit_box()));

        let diagonal = Ray::new(Point3::new(2.0, 2.0, 2.0), Vector3::new(-1.0, -1.0, -1.0));
        assert!(diagonal.intersects_box(&unit_box()));
        assert!((diagonal.direction.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_misses_box() {
        let ray = Ray::new(Point3::new(-1.0, 2.0, 0.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!ray.intersects_box(&unit_box()));

        let pointing_away = Ray::new(Point3::new(-1.0, 0.5, 0.5), Vector3::new(-1.0, 0.0, 0.0));
        assert!(!pointing_away.intersects_box(&unit_box()));
    }

    #[test]
    fn test_distance_window() {
        let short = Ray::with_window(Point3::new(-3.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0), 0.0, 2.0);
        assert!(!short.intersects_box(&unit_box()));

        let long = Ray::with_window(Point3::new(-3.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0), 0.0, 3.5);
        assert!(long.intersects_box(&unit_box()));
    }

    #[test]
    fn test_origin_inside_box() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 1.0, 0.0));
        assert!(ray.intersects_box(&unit_box()));
        assert_eq!(ray.point_at(2.0), Point3::new(0.5, 2.5, 0.5));
    }
}
