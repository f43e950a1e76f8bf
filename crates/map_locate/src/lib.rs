#![forbid(unsafe_code)]
//! map_locate: rule-based location-likelihood heatmaps over geographic grids.
//!
//! Modules:
//! - grid: evenly spaced geographic sampling lattices
//! - geometry: planar point, segment, and polyline distances
//! - density: Gaussian and log-normal densities over distance
//! - rule: declarative rules pairing reference geometry with a density
//! - field: index-aligned probability fields and their composition
//! - runner: plan evaluation over a grid
//! - io: reference polyline loading from coordinate text files
pub mod density;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod rule;
pub mod runner;

/// Convenient re-exports for common types. Import with `use map_locate::prelude::*;`.
pub mod prelude {
    pub use crate::density::{
        derive_log_normal_params, Density, GaussianParams, LogNormalParams,
    };
    pub use crate::error::{Error, Result};
    pub use crate::field::{compose, ProbabilityField};
    pub use crate::geometry::{point_distance, segment_distance, Polyline};
    pub use crate::grid::{Axis, GeoGrid};
    pub use crate::io::{load_polyline, read_polyline};
    pub use crate::rule::{ReferenceGeometry, Rule, RuleId};
    pub use crate::runner::{run_plan, Plan, RuleField, RunResult};
}
