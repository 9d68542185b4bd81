//! Travel distance functions.

use crate::point::PathPoint;

/// Sum of consecutive distances along a point sequence.
pub fn path_distance(points: &[PathPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Travel distance of visiting `points` in the given index order.
pub fn order_distance(order: &[usize], points: &[PathPoint]) -> f64 {
    order
        .windows(2)
        .map(|w| points[w[0]].distance_to(&points[w[1]]))
        .sum()
}
