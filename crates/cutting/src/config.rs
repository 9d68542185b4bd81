//! Configuration for cutting path optimization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for cutting path optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CuttingConfig {
    /// Maximum number of 2-opt improvement passes.
    /// Set to 0 to use only the nearest-neighbor solution.
    pub max_2opt_iterations: usize,

    /// 2-opt is skipped for paths with more points than this.
    pub two_opt_point_limit: usize,

    /// Nearest-neighbor construction is skipped above this many points and the
    /// source order is returned unchanged.
    ///
    /// Nearest neighbor is O(n²): the default of 10 000 points means about 5e7
    /// distance evaluations, well under a second on one core.
    pub max_points: usize,

    /// Machine rapid traverse speed (mm/min).
    /// Used only for time estimation, not for optimization.
    pub rapid_speed: f64,

    /// Minimum length reduction for a 2-opt move to count as an improvement.
    pub tolerance: f64,
}

impl Default for CuttingConfig {
    fn default() -> Self {
        Self {
            max_2opt_iterations: 1000,
            two_opt_point_limit: 2000,
            max_points: 10_000,
            rapid_speed: 5000.0,
            tolerance: 1e-10,
        }
    }
}

impl CuttingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum 2-opt passes.
    pub fn with_max_2opt_iterations(mut self, iterations: usize) -> Self {
        self.max_2opt_iterations = iterations;
        self
    }

    /// Sets the point count above which 2-opt is skipped.
    pub fn with_two_opt_point_limit(mut self, limit: usize) -> Self {
        self.two_opt_point_limit = limit;
        self
    }

    /// Sets the point count above which no optimization runs.
    pub fn with_max_points(mut self, limit: usize) -> Self {
        self.max_points = limit;
        self
    }

    /// Sets the rapid traverse speed (mm/min).
    pub fn with_rapid_speed(mut self, speed: f64) -> Self {
        self.rapid_speed = speed;
        self
    }

    /// Sets the improvement tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }
}
