//! Result types for cutting path optimization.

use cutquote_core::EntityType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::{PathPoint, PointRole};

/// Stage at which a resource cap cut optimization short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CapStage {
    /// Too many points for any optimization; the source order was kept.
    NearestNeighbor,
    /// Too many points for 2-opt; the nearest-neighbor tour was kept.
    TwoOpt,
    /// The 2-opt pass budget ran out while still improving.
    TwoOptIterations,
}

/// Whether optimization ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum OptimizationStatus {
    /// Every stage ran to completion.
    Complete,
    /// A cap was hit; the result is valid but may be improvable.
    Capped {
        /// Where the cap was hit.
        stage: CapStage,
    },
}

impl OptimizationStatus {
    /// Returns true when a cap was hit.
    pub fn is_capped(&self) -> bool {
        matches!(self, OptimizationStatus::Capped { .. })
    }
}

/// Tour 2-opt started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TourSeed {
    /// Nearest-neighbor construction.
    NearestNeighbor,
    /// Source order (nearest neighbor was longer, or skipped).
    SourceOrder,
}

/// Result of cutting path optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    /// Points in source order.
    pub original: Vec<PathPoint>,

    /// The same points in optimized order.
    pub optimized: Vec<PathPoint>,

    /// Travel distance of the source order.
    pub original_distance: f64,

    /// Travel distance of the optimized order.
    pub optimized_distance: f64,

    /// `original_distance - optimized_distance`, never negative.
    pub savings: f64,

    /// Savings as a percentage of the original distance.
    pub savings_pct: f64,

    /// Whether a cap was hit.
    pub status: OptimizationStatus,

    /// Tour that seeded 2-opt.
    pub seed: TourSeed,

    /// 2-opt passes run.
    pub two_opt_passes: usize,

    /// Improving 2-opt reversals applied.
    pub reversals: usize,

    /// Rapid-travel time saved at the configured rapid speed, in minutes.
    pub estimated_time_saved_min: f64,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PathResult {
    /// Creates an unoptimized result where the optimized order equals the source order.
    pub fn unchanged(points: Vec<PathPoint>, distance: f64, status: OptimizationStatus) -> Self {
        Self {
            optimized: points.clone(),
            original: points,
            original_distance: distance,
            optimized_distance: distance,
            savings: 0.0,
            savings_pct: 0.0,
            status,
            seed: TourSeed::SourceOrder,
            two_opt_passes: 0,
            reversals: 0,
            estimated_time_saved_min: 0.0,
            computation_time_ms: 0,
        }
    }

    /// Number of points on the path.
    pub fn len(&self) -> usize {
        self.optimized.len()
    }

    /// Returns true if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.optimized.is_empty()
    }

    /// Numbered optimized path for visualization.
    pub fn steps(&self) -> Vec<PathStep> {
        self.optimized
            .iter()
            .enumerate()
            .map(|(i, p)| PathStep {
                step: i + 1,
                x: p.position.x,
                y: p.position.y,
                entity_index: p.entity_index,
                entity_type: p.entity_type,
                role: p.role,
            })
            .collect()
    }
}

/// A single numbered step of the optimized path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathStep {
    /// 1-based step number.
    pub step: usize,
    pub x: f64,
    pub y: f64,
    /// Index of the owning entity in the drawing.
    pub entity_index: usize,
    /// Type of the owning entity.
    pub entity_type: EntityType,
    /// Role of the point on its entity.
    pub role: PointRole,
}
