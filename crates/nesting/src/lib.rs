//! Grid nesting of identical parts on stock sheets.
//!
//! A part is reduced to its axis-aligned bounding box and placed in a
//! regular grid, `spacing` apart and `spacing` from the sheet edge, on each
//! sheet of a catalog. The sheet with the highest material utilization wins;
//! ties go to the lowest cost per part.
//!
//! # Example
//!
//! ```rust
//! use cutquote_nesting::{Nester, NestingStatus};
//!
//! let result = Nester::default_config().nest(200.0, 100.0).unwrap();
//! assert_eq!(result.status, NestingStatus::Placed);
//! assert_eq!(result.candidates[0].total_parts, 76);
//! ```

pub mod config;
pub mod nester;
pub mod result;
pub mod sheet;

pub use config::NestingConfig;
pub use nester::Nester;
pub use result::{
    NestingRecommendation, NestingResult, NestingStatus, PartPlacement, SheetCandidate,
};
pub use sheet::{standard_sheets, Sheet, STANDARD_COST_PER_MM2};
