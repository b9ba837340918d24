// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - kernel primitives and the solid container

pub mod analytics;
mod bbox;
mod line;
mod plane;
mod primitives;
mod ray;
mod solid;

pub use analytics::GeometryStats;
pub use bbox::BoundingBox;
pub use line::{Line, PlaneIntersection};
pub use plane::Plane;
pub use primitives::Primitive;
pub use ray::Ray;
pub use solid::Solid;
