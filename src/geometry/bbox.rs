// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis-aligned bounding boxes for faces and solids

use crate::error::{CsgError, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Create a box from its extents; fails if `max < min` on any axis
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        if max.x < min.x || max.y < min.y || max.z < min.z {
            return Err(CsgError::construction(format!(
                "bound max {:?} is below min {:?}",
                max.coords, min.coords
            )));
        }
        Ok(Self { min, max })
    }

    /// Tight box around a non-empty point set
    pub fn from_points(points: &[Point3<f64>]) -> Result<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or_else(|| CsgError::construction("cannot bound an empty point set"))?;

        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for point in rest {
            bbox.expand_to_include(point);
        }
        Ok(bbox)
    }

    /// Tight box around one triangle
    pub fn from_triangle(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Self {
        let mut bbox = Self { min: *p0, max: *p0 };
        bbox.expand_to_include(p1);
        bbox.expand_to_include(p2);
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Overlap test with the boxes grown by `tolerance` on every side
    pub fn overlaps(&self, other: &BoundingBox, tolerance: f64) -> bool {
        !(self.min.x > other.max.x + tolerance
            || self.max.x < other.min.x - tolerance
            || self.min.y > other.max.y + tolerance
            || self.max.y < other.min.y - tolerance
            || self.min.z > other.max.z + tolerance
            || self.max.z < other.min.z - tolerance)
    }

    /// Box grown by `amount` on every side
    pub fn expanded(&self, amount: f64) -> Self {
        let delta = Vector3::repeat(amount);
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    /// Corner selected by a ray sign: 0 is the min corner, anything else the max corner
    pub fn corner(&self, index: usize) -> Point3<f64> {
        if index == 0 {
            self.min
        } else {
            self.max
        }
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Overlapping region; collapses to a flat box on axes that do not overlap
    pub fn intersection(&self, other: &BoundingBox) -> Self {
        let min = self.min.sup(&other.min);
        let max = min.sup(&self.max.inf(&other.max));
        Self { min, max }
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
            && self.min.z <= other.min.z
            && self.max.z >= other.max.z
    }

    pub fn contains_point(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            point[axis] >= self.min[axis] - tolerance && point[axis] <= self.max[axis] + tolerance
        })
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    pub fn surface_area(&self) -> f64 {
        let size = self.size();
        2.0 * (size.x * size.y + size.y * size.z + size.x * size.z)
    }
}
