//! Path optimization entry points.
//!
//! Combines point extraction, nearest-neighbor construction and 2-opt
//! improvement into a complete [`PathResult`].

use std::time::Instant;

use cutquote_core::Drawing;

use crate::config::CuttingConfig;
use crate::cost::{order_distance, path_distance};
use crate::point::{extract_points, PathPoint};
use crate::result::{CapStage, OptimizationStatus, PathResult, TourSeed};
use crate::sequence::{improve_2opt, nearest_neighbor};

/// Optimizes the cutting point order of a drawing.
///
/// This is the main entry point for path optimization. It:
/// 1. Extracts cut points in source order
/// 2. Builds a nearest-neighbor tour from the first point
/// 3. Seeds 2-opt with the shorter of that tour and the source order
/// 4. Improves the seed with bounded 2-opt
///
/// The optimized distance never exceeds the source-order distance, and the
/// result is deterministic.
///
/// # Example
///
/// ```rust
/// use cutquote_core::{Drawing, Entity};
/// use cutquote_cutting::{optimize_path, CuttingConfig};
///
/// let drawing = Drawing::from_entities(vec![
///     Entity::line((0.0, 0.0), (10.0, 0.0)),
///     Entity::line((50.0, 0.0), (60.0, 0.0)),
///     Entity::line((10.0, 5.0), (40.0, 5.0)),
/// ]);
///
/// let result = optimize_path(&drawing, &CuttingConfig::default());
/// assert!(result.optimized_distance <= result.original_distance);
/// ```
pub fn optimize_path(drawing: &Drawing, config: &CuttingConfig) -> PathResult {
    optimize_points(extract_points(drawing), config)
}

/// Optimizes an explicit point sequence (source order = given order).
pub fn optimize_points(points: Vec<PathPoint>, config: &CuttingConfig) -> PathResult {
    let start = Instant::now();
    let n = points.len();
    let original_distance = path_distance(&points);

    if n < 2 {
        return PathResult::unchanged(points, original_distance, OptimizationStatus::Complete);
    }

    if n > config.max_points {
        log::warn!(
            "path has {} points (limit {}); keeping source order",
            n,
            config.max_points
        );
        let mut result = PathResult::unchanged(
            points,
            original_distance,
            OptimizationStatus::Capped {
                stage: CapStage::NearestNeighbor,
            },
        );
        result.computation_time_ms = start.elapsed().as_millis() as u64;
        return result;
    }

    // Step 1: Nearest Neighbor construction
    let nn_order = nearest_neighbor(&points);
    let nn_distance = order_distance(&nn_order, &points);

    // Step 2: Seed with the shorter tour so 2-opt can only improve on the source
    let (mut order, seed) = if nn_distance <= original_distance {
        (nn_order, TourSeed::NearestNeighbor)
    } else {
        log::debug!(
            "nearest neighbor ({:.3}) longer than source order ({:.3}); seeding 2-opt with source order",
            nn_distance,
            original_distance
        );
        ((0..n).collect(), TourSeed::SourceOrder)
    };

    // Step 3: 2-opt improvement
    let mut status = OptimizationStatus::Complete;
    let mut two_opt_passes = 0;
    let mut reversals = 0;
    if n > config.two_opt_point_limit {
        log::warn!(
            "path has {} points (2-opt limit {}); skipping 2-opt",
            n,
            config.two_opt_point_limit
        );
        status = OptimizationStatus::Capped {
            stage: CapStage::TwoOpt,
        };
    } else {
        let stats = improve_2opt(&mut order, &points, config);
        two_opt_passes = stats.passes;
        reversals = stats.reversals;
        if !stats.converged {
            log::warn!("2-opt stopped after {} passes while still improving", stats.passes);
            status = OptimizationStatus::Capped {
                stage: CapStage::TwoOptIterations,
            };
        }
    }

    let mut optimized: Vec<PathPoint> = order.iter().map(|&i| points[i]).collect();
    let mut optimized_distance = path_distance(&optimized);
    if optimized_distance > original_distance {
        // Only reachable through summation rounding after near-zero 2-opt gains.
        log::debug!(
            "optimized order sums to {} > source {}; keeping source order",
            optimized_distance,
            original_distance
        );
        optimized = points.clone();
        optimized_distance = original_distance;
    }
    let savings = (original_distance - optimized_distance).max(0.0);
    let savings_pct = if original_distance > 0.0 {
        savings / original_distance * 100.0
    } else {
        0.0
    };
    let estimated_time_saved_min = if config.rapid_speed > 0.0 {
        savings / config.rapid_speed
    } else {
        0.0
    };

    log::debug!(
        "path optimized: {} points, {:.3} -> {:.3} ({:.1}% saved)",
        n,
        original_distance,
        optimized_distance,
        savings_pct
    );

    PathResult {
        original: points,
        optimized,
        original_distance,
        optimized_distance,
        savings,
        savings_pct,
        status,
        seed,
        two_opt_passes,
        reversals,
        estimated_time_saved_min,
        computation_time_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cutquote_core::Entity;

    #[test]
    fn test_empty_drawing() {
        let result = optimize_path(&Drawing::from_entities(Vec::new()), &CuttingConfig::default());
        assert!(result.is_empty());
        assert_eq!(result.savings, 0.0);
        assert_eq!(result.status, OptimizationStatus::Complete);
    }

    #[test]
    fn test_single_point() {
        let drawing = Drawing::from_entities(vec![Entity::circle((5.0, 5.0), 1.0)]);
        let result = optimize_path(&drawing, &CuttingConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result.original, result.optimized);
        assert_eq!(result.savings_pct, 0.0);
    }

    #[test]
    fn test_scattered_circles_improve() {
        // Centers visited far-near-far in source order.
        let drawing = Drawing::from_entities(vec![
            Entity::circle((0.0, 0.0), 1.0),
            Entity::circle((100.0, 0.0), 1.0),
            Entity::circle((10.0, 0.0), 1.0),
            Entity::circle((90.0, 0.0), 1.0),
            Entity::circle((20.0, 0.0), 1.0),
        ]);
        let result = optimize_path(&drawing, &CuttingConfig::default());
        assert_relative_eq!(result.original_distance, 100.0 + 90.0 + 80.0 + 70.0);
        assert_relative_eq!(result.optimized_distance, 100.0);
        assert!(result.savings_pct > 70.0);
        assert_eq!(result.status, OptimizationStatus::Complete);
    }

    #[test]
    fn test_point_limit_caps() {
        let drawing = Drawing::from_entities(vec![
            Entity::line((0.0, 0.0), (100.0, 0.0)),
            Entity::line((10.0, 0.0), (90.0, 0.0)),
        ]);
        let capped = optimize_path(&drawing, &CuttingConfig::new().with_max_points(3));
        assert_eq!(
            capped.status,
            OptimizationStatus::Capped {
                stage: CapStage::NearestNeighbor
            }
        );
        assert_eq!(capped.original, capped.optimized);

        let no_2opt = optimize_path(&drawing, &CuttingConfig::new().with_two_opt_point_limit(3));
        assert_eq!(
            no_2opt.status,
            OptimizationStatus::Capped {
                stage: CapStage::TwoOpt
            }
        );
        assert!(no_2opt.optimized_distance <= no_2opt.original_distance);
    }

    #[test]
    fn test_time_saving_estimate() {
        let drawing = Drawing::from_entities(vec![
            Entity::circle((0.0, 0.0), 1.0),
            Entity::circle((1000.0, 0.0), 1.0),
            Entity::circle((10.0, 0.0), 1.0),
        ]);
        let result = optimize_path(&drawing, &CuttingConfig::new().with_rapid_speed(1000.0));
        assert_relative_eq!(result.estimated_time_saved_min, result.savings / 1000.0);
    }
}
