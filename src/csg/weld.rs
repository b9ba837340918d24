// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Positional vertex welding on a uniform hash grid

use crate::utils::math::points_equal;
use ahash::AHashMap;
use nalgebra::Point3;

/// Finds previously inserted points equal to a query within `tolerance` on every axis.
///
/// Cells are `tolerance` wide, so any match lives in the query's cell or one of
/// its 26 neighbours.
#[derive(Debug, Clone)]
pub struct PointWelder {
    tolerance: f64,
    points: Vec<Point3<f64>>,
    cells: AHashMap<[i64; 3], Vec<usize>>,
}

impl PointWelder {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
            cells: AHashMap::new(),
        }
    }

    fn cell(&self, point: &Point3<f64>) -> [i64; 3] {
        [
            (point.x / self.tolerance).floor() as i64,
            (point.y / self.tolerance).floor() as i64,
            (point.z / self.tolerance).floor() as i64,
        ]
    }

    /// Index of the first inserted point equal to `point`
    pub fn find(&self, point: &Point3<f64>) -> Option<usize> {
        let [cx, cy, cz] = self.cell(point);
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    for &index in bucket {
                        if points_equal(&self.points[index], point, self.tolerance)
                            && best.map_or(true, |b| index < b)
                        {
                            best = Some(index);
                        }
                    }
                }
            }
        }
        best
    }

    /// Register a point without searching; returns its index
    pub fn insert(&mut self, point: Point3<f64>) -> usize {
        let index = self.points.len();
        let key = self.cell(&point);
        self.cells.entry(key).or_default().push(index);
        self.points.push(point);
        index
    }

    /// Existing index for `point`, or a fresh one; the flag is true when inserted
    pub fn find_or_insert(&mut self, point: Point3<f64>) -> (usize, bool) {
        match self.find(&point) {
            Some(index) => (index, false),
            None => (self.insert(point), true),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welds_within_tolerance() {
        let mut welder = PointWelder::new(1e-5);
        let (a, inserted) = welder.find_or_insert(Point3::new(1.0, 2.0, 3.0));
        assert!(inserted);
        let (b, inserted) = welder.find_or_insert(Point3::new(1.0 + 5e-6, 2.0 - 5e-6, 3.0));
        assert!(!inserted);
        assert_eq!(a, b);
        let (c, inserted) = welder.find_or_insert(Point3::new(1.0 + 2e-5, 2.0, 3.0));
        assert!(inserted);
        assert_ne!(a, c);
        assert_eq!(welder.len(), 2);
    }

    #[test]
    fn test_welds_across_cell_boundaries() {
        let mut welder = PointWelder::new(1e-5);
        // straddles a cell edge at the origin
        welder.insert(Point3::new(-1e-6, -1e-6, -1e-6));
        assert_eq!(welder.find(&Point3::new(1e-6, 1e-6, 1e-6)), Some(0));
    }

    #[test]
    fn test_first_match_wins() {
        let mut welder = PointWelder::new(1e-5);
        welder.insert(Point3::new(0.0, 0.0, 0.0));
        welder.insert(Point3::new(8e-6, 0.0, 0.0));
        assert_eq!(welder.find(&Point3::new(4e-6, 0.0, 0.0)), Some(0));
        assert_eq!(welder.into_points().len(), 2);
    }
}
