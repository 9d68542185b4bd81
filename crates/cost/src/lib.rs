//! # CutQuote Cost
//!
//! Machining time and cost estimation from aggregate drawing metrics.
//!
//! ```rust
//! use cutquote_core::{Drawing, Entity};
//! use cutquote_cost::CostEstimator;
//!
//! let drawing = Drawing::from_entities(vec![Entity::line((0.0, 0.0), (1000.0, 0.0))]);
//! let estimate = CostEstimator::default().estimate(&drawing, "steel", 5.0).unwrap();
//!
//! assert!(estimate.total > estimate.setup_cost);
//! ```

pub mod advice;
pub mod compare;
pub mod config;
pub mod estimator;
pub mod material;

pub use advice::{CostAdvice, CostDriver, DesignSuggestion, Priority};
pub use compare::MaterialAlternative;
pub use config::CostConfig;
pub use estimator::{CostEstimate, CostEstimator};
pub use material::{Material, MaterialProperties};
