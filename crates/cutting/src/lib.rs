//! Cutting path optimization for drawings.
//!
//! Given a drawing, this crate reorders its cut points (line endpoints,
//! circle and arc centers, polyline vertices) to minimize non-cutting
//! (rapid) travel distance.
//!
//! # Algorithm
//!
//! 1. **Point extraction**: Collect cut points in source order
//! 2. **Construction**: Nearest Neighbor tour from the first point
//! 3. **Seeding**: Keep the shorter of the NN tour and the source order
//! 4. **Improvement**: Bounded 2-opt on the open path
//!
//! Large inputs are capped (see [`CuttingConfig`]) and flagged through
//! [`OptimizationStatus::Capped`] instead of failing.

pub mod config;
pub mod cost;
pub mod path;
pub mod point;
pub mod result;
pub mod sequence;

pub use config::CuttingConfig;
pub use cost::path_distance;
pub use path::{optimize_path, optimize_points};
pub use point::{extract_points, PathPoint, PointRole};
pub use result::{CapStage, OptimizationStatus, PathResult, PathStep, TourSeed};
