// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented planes in Hessian normal form

use crate::error::{CsgError, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Plane with unit normal; points `p` on the plane satisfy `normal · p = distance`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub distance: f64,
}

/// Normals shorter than this cannot be normalized meaningfully
const MIN_NORMAL_LENGTH: f64 = 1e-12;

impl Plane {
    /// Plane through three points, oriented by their winding
    pub fn from_points(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Result<Self> {
        let normal = (p1 - p0).cross(&(p2 - p0));
        let normal = normal.try_normalize(MIN_NORMAL_LENGTH).ok_or_else(|| {
            CsgError::degenerate(format!(
                "points {:?}, {:?}, {:?} do not span a plane",
                p0.coords, p1.coords, p2.coords
            ))
        })?;
        Ok(Self {
            normal,
            distance: normal.dot(&p0.coords),
        })
    }

    /// Plane with the given normal passing through `point`
    pub fn from_normal_and_point(normal: &Vector3<f64>, point: &Point3<f64>) -> Result<Self> {
        let normal = Self::unit(normal)?;
        Ok(Self {
            normal,
            distance: normal.dot(&point.coords),
        })
    }

    /// Plane with the given normal at signed `distance` from the origin
    pub fn from_normal_and_distance(normal: &Vector3<f64>, distance: f64) -> Result<Self> {
        Ok(Self {
            normal: Self::unit(normal)?,
            distance,
        })
    }

    fn unit(normal: &Vector3<f64>) -> Result<Vector3<f64>> {
        normal
            .try_normalize(MIN_NORMAL_LENGTH)
            .ok_or_else(|| CsgError::degenerate("zero-length plane normal"))
    }

    /// Signed distance; positive on the side the normal points to
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        point.coords.dot(&self.normal) - self.distance
    }

    /// Same plane facing the other way
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}
