//! # CutQuote Core
//!
//! Geometry model and entity metrics for the CutQuote quoting pipeline.
//!
//! This crate turns the loosely-typed records produced by a drawing parser into a
//! canonical, immutable [`Drawing`] that the cost estimator, path optimizer and
//! nesting optimizer all read from.
//!
//! ## Core Components
//!
//! - **Records**: [`RawRecord`], [`RawPoint`] - parser output, tolerant of several encodings
//! - **Entities**: [`Entity`], [`EntityKind`], [`EntityType`] - canonical geometry with a derived length
//! - **Drawing**: [`Drawing`] - ordered entities plus bounding box, counts, layers and complexity
//! - **Metrics**: [`ComplexityMetrics`], [`complexity_score`] - the weighted 0-100 complexity score
//! - **Errors**: [`Error`], [`Result`]
//!
//! ## Example
//!
//! ```rust
//! use cutquote_core::{Drawing, Entity};
//!
//! let drawing = Drawing::from_entities(vec![
//!     Entity::line((0.0, 0.0), (100.0, 0.0)),
//!     Entity::line((100.0, 0.0), (100.0, 50.0)),
//!     Entity::line((100.0, 50.0), (0.0, 50.0)),
//!     Entity::line((0.0, 50.0), (0.0, 0.0)),
//! ]);
//!
//! assert_eq!(drawing.total_length(), 300.0);
//! assert!(drawing.complexity_score() < 25.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization support and JSON record parsing

pub mod drawing;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod record;
pub mod spline;

pub use drawing::{Drawing, EntityCounts, LayerStats, SkippedRecord};
pub use entity::{Entity, EntityKind, EntityType, DEFAULT_LAYER};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Point2};
pub use metrics::{complexity_score, ComplexityFactors, ComplexityInputs, ComplexityMetrics};
pub use record::{RawAxis, RawPoint, RawRecord};
