// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::Solid;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Enclosed volume in cubic units
    pub volume: f64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Vertex average [x, y, z]
    pub centroid: [f64; 3],
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Every edge shared by exactly two triangles in opposite directions
    pub is_watertight: bool,
}

impl GeometryStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
        }
    }

    /// Pretty print statistics
    pub fn print(&self) {
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              GEOMETRY ANALYTICS                          ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!(
            "║ Volume:          {:>10.4}                              ║",
            self.volume
        );
        println!(
            "║ Surface Area:    {:>10.4}                              ║",
            self.surface_area
        );
        println!(
            "║ Centroid:        ({:>7.2}, {:>7.2}, {:>7.2})            ║",
            self.centroid[0], self.centroid[1], self.centroid[2]
        );
        println!("║                                                          ║");
        println!("║ Bounding Box:                                            ║");
        println!(
            "║   Min: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[0], self.bbox[1], self.bbox[2]
        );
        println!(
            "║   Max: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[3], self.bbox[4], self.bbox[5]
        );
        println!("║                                                          ║");
        println!(
            "║ Vertices:        {:>10}                              ║",
            self.vertex_count
        );
        println!(
            "║ Triangles:       {:>10}                              ║",
            self.triangle_count
        );
        println!(
            "║ Watertight:      {:>10}                              ║",
            if self.is_watertight { "Yes" } else { "No" }
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze a solid and compute statistics
pub fn analyze(solid: &Solid) -> GeometryStats {
    if solid.is_empty() {
        return GeometryStats::empty();
    }

    let bbox = solid
        .bounding_box()
        .map(|b| [b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z])
        .unwrap_or([0.0; 6]);
    let centroid = solid.mean();

    GeometryStats {
        volume: volume(solid),
        surface_area: surface_area(solid),
        bbox,
        centroid: [centroid.x, centroid.y, centroid.z],
        vertex_count: solid.vertex_count(),
        triangle_count: solid.triangle_count(),
        is_watertight: is_watertight(solid),
    }
}

/// Sum of origin tetrahedra; positive for a closed surface wound outward
pub fn signed_volume(solid: &Solid) -> f64 {
    solid
        .triangles()
        .map(|[v0, v1, v2]| v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0)
        .sum()
}

/// Enclosed volume regardless of winding
pub fn volume(solid: &Solid) -> f64 {
    signed_volume(solid).abs()
}

/// Calculate total surface area
pub fn surface_area(solid: &Solid) -> f64 {
    solid
        .triangles()
        .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() / 2.0)
        .sum()
}

/// Check that every directed edge is matched by exactly one reversed edge
pub fn is_watertight(solid: &Solid) -> bool {
    if solid.is_empty() {
        return false;
    }

    // (uses as low -> high, uses as high -> low) per undirected edge
    let mut edges: AHashMap<(usize, usize), (usize, usize)> = AHashMap::new();
    for triangle in solid.triangle_indices() {
        for i in 0..3 {
            let (a, b) = (triangle[i], triangle[(i + 1) % 3]);
            if a < b {
                edges.entry((a, b)).or_default().0 += 1;
            } else {
                edges.entry((b, a)).or_default().1 += 1;
            }
        }
    }

    edges.values().all(|&uses| uses == (1, 1))
}
