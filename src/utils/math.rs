// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Per-axis positional equality, the notion of "same vertex" used everywhere
pub fn points_equal(a: &Point3<f64>, b: &Point3<f64>, epsilon: f64) -> bool {
    approx_eq(a.x, b.x, epsilon) && approx_eq(a.y, b.y, epsilon) && approx_eq(a.z, b.z, epsilon)
}

/// Sign of a signed distance: -1, 0 or +1 with a dead zone of `epsilon`
pub fn sign(value: f64, epsilon: f64) -> i8 {
    if value > epsilon {
        1
    } else if value < -epsilon {
        -1
    } else {
        0
    }
}

/// Index of the component with the largest magnitude
pub fn dominant_axis(v: &Vector3<f64>) -> usize {
    let a = v.abs();
    if a.x >= a.y && a.x >= a.z {
        0
    } else if a.y >= a.z {
        1
    } else {
        2
    }
}

/// Area of the triangle (p0, p1, p2)
pub fn triangle_area(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_points_equal_is_per_axis() {
        let a = Point3::new(0.0, 0.0, 0.0);
        assert!(points_equal(&a, &Point3::new(9e-6, -9e-6, 9e-6), 1e-5));
        assert!(!points_equal(&a, &Point3::new(0.0, 2e-5, 0.0), 1e-5));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(0.5, 1e-10), 1);
        assert_eq!(sign(-0.5, 1e-10), -1);
        assert_eq!(sign(1e-12, 1e-10), 0);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(dominant_axis(&Vector3::new(0.1, -0.9, 0.2)), 1);
        assert_eq!(dominant_axis(&Vector3::new(0.0, 0.0, -1.0)), 2);
        assert_eq!(dominant_axis(&Vector3::new(1.0, 1.0, 1.0)), 0);
    }

    #[test]
    fn test_triangle_area() {
        let area = triangle_area(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::new(0.0, 2.0, 0.0),
        );
        assert!(approx_eq(area, 2.0, 1e-12));
    }
}
