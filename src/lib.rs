// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshbool
//!
//! Constructive solid geometry on closed triangle meshes: union, intersection
//! and difference of two [`Solid`]s, computed by splitting each mesh along the
//! other's surface and classifying the resulting faces with ray casts.

pub mod config;
pub mod csg;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod utils;

pub use config::CsgConfig;
pub use csg::{boolean, boolean_with_config, BooleanModeller, BooleanOp, Status};
pub use error::{CsgError, Result};
pub use geometry::{Primitive, Solid};
pub use kernel::Kernel;
