//! Cut point sequence optimization.
//!
//! Determines the order to visit cut points, minimizing non-cutting (rapid)
//! travel distance on an open path that starts at the first source point.
//!
//! # Algorithms
//!
//! 1. **Nearest Neighbor (NN)**: Greedy construction heuristic that always
//!    moves to the closest unvisited point.
//! 2. **2-opt**: Local search improvement that reverses sub-sequences while
//!    doing so strictly shortens the path.

use crate::config::CuttingConfig;
use crate::cost::order_distance;
use crate::point::PathPoint;

/// Outcome of the 2-opt improvement loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TwoOptStats {
    /// Passes over all index pairs.
    pub passes: usize,
    /// Improving reversals applied.
    pub reversals: usize,
    /// False when the pass budget ran out while moves were still improving.
    pub converged: bool,
}

/// Nearest Neighbor construction heuristic.
///
/// Starts from the first point and greedily moves to the closest unvisited
/// point. Ties go to the lowest index.
pub fn nearest_neighbor(points: &[PathPoint]) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    for _ in 1..n {
        let mut best_idx = None;
        let mut best_dist = f64::INFINITY;

        for (idx, point) in points.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let dist = points[current].distance_to(point);
            if dist < best_dist {
                best_dist = dist;
                best_idx = Some(idx);
            }
        }

        // Non-finite distances never compare less; fall back to the first unvisited point.
        let next = match best_idx.or_else(|| visited.iter().position(|v| !v)) {
            Some(idx) => idx,
            None => break,
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// 2-opt improvement on an open path with a fixed first point.
///
/// Reversing `order[i+1..=j]` replaces edges `(i, i+1)` and `(j, j+1)` with
/// `(i, j)` and `(i+1, j+1)`; the move is kept only when that strictly shortens
/// the path by more than `config.tolerance`.
pub fn improve_2opt(order: &mut [usize], points: &[PathPoint], config: &CuttingConfig) -> TwoOptStats {
    let n = order.len();
    let mut stats = TwoOptStats {
        converged: true,
        ..TwoOptStats::default()
    };
    if n < 3 {
        return stats;
    }

    // A zero budget disables 2-opt entirely.
    let mut improved = config.max_2opt_iterations > 0;
    while improved {
        if stats.passes == config.max_2opt_iterations {
            stats.converged = false;
            break;
        }
        improved = false;
        stats.passes += 1;

        for i in 0..n - 1 {
            for j in (i + 2)..n {
                let delta = reversal_delta(order, points, i, j);
                if delta < -config.tolerance {
                    order[i + 1..=j].reverse();
                    stats.reversals += 1;
                    improved = true;
                }
            }
        }
    }

    log::debug!(
        "2-opt: {} passes, {} reversals, length {:.3}",
        stats.passes,
        stats.reversals,
        order_distance(order, points)
    );
    stats
}

/// Length change from reversing `order[i+1..=j]` on an open path.
fn reversal_delta(order: &[usize], points: &[PathPoint], i: usize, j: usize) -> f64 {
    let d = |a: usize, b: usize| points[order[a]].distance_to(&points[order[b]]);
    let mut delta = d(i, j) - d(i, i + 1);
    if j + 1 < order.len() {
        delta += d(i + 1, j + 1) - d(j, j + 1);
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointRole;
    use approx::assert_relative_eq;
    use cutquote_core::{EntityType, Point2};

    fn pt(x: f64, y: f64) -> PathPoint {
        PathPoint {
            position: Point2::new(x, y),
            entity_index: 0,
            entity_type: EntityType::Line,
            role: PointRole::Start,
        }
    }

    #[test]
    fn test_nn_selects_nearest() {
        let points = vec![pt(0.0, 0.0), pt(100.0, 0.0), pt(20.0, 0.0), pt(60.0, 0.0)];
        assert_eq!(nearest_neighbor(&points), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_nn_tie_goes_to_lowest_index() {
        let points = vec![pt(0.0, 0.0), pt(-10.0, 0.0), pt(10.0, 0.0)];
        assert_eq!(nearest_neighbor(&points), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(nearest_neighbor(&[]).is_empty());
        assert_eq!(nearest_neighbor(&[pt(1.0, 1.0)]), vec![0]);
    }

    #[test]
    fn test_2opt_removes_crossing() {
        // 0 -> 2 -> 1 -> 3 zig-zags; 0 -> 1 -> 2 -> 3 is straight.
        let points = vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0), pt(30.0, 0.0)];
        let mut order = vec![0, 2, 1, 3];
        let before = order_distance(&order, &points);
        let stats = improve_2opt(&mut order, &points, &CuttingConfig::default());

        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(stats.converged);
        assert!(stats.reversals >= 1);
        assert!(order_distance(&order, &points) < before);
        assert_relative_eq!(order_distance(&order, &points), 30.0);
    }

    #[test]
    fn test_2opt_keeps_first_point() {
        let points = vec![pt(5.0, 0.0), pt(0.0, 0.0), pt(10.0, 0.0)];
        let mut order = vec![0, 1, 2];
        improve_2opt(&mut order, &points, &CuttingConfig::default());
        assert_eq!(order[0], 0);
    }

    #[test]
    fn test_delta_matches_full_recompute() {
        let points = vec![pt(0.0, 0.0), pt(7.0, 3.0), pt(2.0, 9.0), pt(11.0, 1.0), pt(4.0, 4.0)];
        let order = vec![0, 1, 2, 3, 4];
        for i in 0..order.len() - 1 {
            for j in (i + 2)..order.len() {
                let mut reversed = order.clone();
                reversed[i + 1..=j].reverse();
                let expected = order_distance(&reversed, &points) - order_distance(&order, &points);
                assert_relative_eq!(reversal_delta(&order, &points, i, j), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_pass_budget() {
        let points = vec![pt(0.0, 0.0), pt(20.0, 0.0), pt(10.0, 0.0), pt(30.0, 0.0)];
        let mut order = vec![0, 1, 2, 3];
        let config = CuttingConfig::new().with_max_2opt_iterations(0);
        let stats = improve_2opt(&mut order, &points, &config);
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(stats.passes, 0);
        assert!(stats.converged);
    }

    #[test]
    fn test_pass_budget_exhausted() {
        let points = vec![pt(0.0, 0.0), pt(20.0, 0.0), pt(10.0, 0.0), pt(30.0, 0.0)];
        let mut order = vec![0, 1, 2, 3];
        let config = CuttingConfig::new().with_max_2opt_iterations(1);
        let stats = improve_2opt(&mut order, &points, &config);
        assert_eq!(stats.passes, 1);
        assert!(stats.reversals >= 1);
        assert!(!stats.converged);
    }
}
