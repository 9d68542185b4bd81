//! Property tests for path optimization over seeded random drawings.

use approx::assert_relative_eq;
use cutquote_core::{Drawing, Entity, EntityType};
use cutquote_cutting::{
    optimize_path, optimize_points, path_distance, CuttingConfig, OptimizationStatus, PathPoint,
    PointRole,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_drawing(seed: u64, n: usize) -> Drawing {
    let mut rng = StdRng::seed_from_u64(seed);
    let entities = (0..n)
        .map(|i| {
            let x = rng.gen_range(0.0..1000.0);
            let y = rng.gen_range(0.0..500.0);
            match i % 3 {
                0 => Entity::line((x, y), (x + rng.gen_range(1.0..50.0), y)),
                1 => Entity::circle((x, y), rng.gen_range(1.0..20.0)),
                _ => Entity::polyline(vec![(x, y), (x + 10.0, y), (x + 10.0, y + 10.0)], true),
            }
        })
        .collect();
    Drawing::from_entities(entities)
}

fn sorted_key(points: &[PathPoint]) -> Vec<(u64, u64, usize)> {
    let mut key: Vec<_> = points
        .iter()
        .map(|p| (p.position.x.to_bits(), p.position.y.to_bits(), p.entity_index))
        .collect();
    key.sort_unstable();
    key
}

mod property_tests {
    use super::*;

    #[test]
    fn test_optimized_is_permutation() {
        for seed in 0..5 {
            let result = optimize_path(&random_drawing(seed, 60), &CuttingConfig::default());
            assert_eq!(result.original.len(), result.optimized.len());
            assert_eq!(sorted_key(&result.original), sorted_key(&result.optimized));
        }
    }

    #[test]
    fn test_never_longer_than_source() {
        for seed in 0..10 {
            let result = optimize_path(&random_drawing(seed, 45), &CuttingConfig::default());
            assert!(result.optimized_distance <= result.original_distance);
            assert!(result.savings >= 0.0);
            assert_eq!(result.status, OptimizationStatus::Complete);
        }
    }

    #[test]
    fn test_reported_distances_match_paths() {
        let result = optimize_path(&random_drawing(7, 40), &CuttingConfig::default());
        assert_relative_eq!(result.original_distance, path_distance(&result.original), epsilon = 1e-9);
        assert_eq!(result.optimized_distance, path_distance(&result.optimized));
        assert_relative_eq!(
            result.savings_pct,
            result.savings / result.original_distance * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_optimized_distance_is_exact_sum() {
        // Large coordinates make near-zero 2-opt gains subject to rounding.
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points: Vec<PathPoint> = (0..120)
                .map(|i| {
                    let x = 1e9 + rng.gen_range(0.0..1.0);
                    let y = 1e9 + rng.gen_range(0.0..1.0);
                    PathPoint {
                        position: (x, y).into(),
                        entity_index: i,
                        entity_type: EntityType::Circle,
                        role: PointRole::Center,
                    }
                })
                .collect();
            let result = optimize_points(points, &CuttingConfig::default());
            assert_eq!(result.optimized_distance, path_distance(&result.optimized));
            assert!(result.optimized_distance <= result.original_distance);
        }
    }

    #[test]
    fn test_deterministic() {
        let drawing = random_drawing(42, 80);
        let config = CuttingConfig::default();
        let a = optimize_path(&drawing, &config);
        let b = optimize_path(&drawing, &config);
        assert_eq!(a.optimized, b.optimized);
        assert_eq!(a.optimized_distance, b.optimized_distance);
    }

    #[test]
    fn test_first_point_is_fixed() {
        let result = optimize_path(&random_drawing(3, 30), &CuttingConfig::default());
        assert_eq!(result.original[0], result.optimized[0]);
    }
}

mod cap_tests {
    use super::*;

    #[test]
    fn test_capped_result_is_still_valid() {
        let drawing = random_drawing(11, 200);
        let config = CuttingConfig::new().with_two_opt_point_limit(50);
        let result = optimize_path(&drawing, &config);
        assert!(result.status.is_capped());
        assert_eq!(sorted_key(&result.original), sorted_key(&result.optimized));
        assert!(result.optimized_distance <= result.original_distance);
    }
}

mod visualization_tests {
    use super::*;

    #[test]
    fn test_steps_follow_optimized_order() {
        let result = optimize_path(&random_drawing(5, 12), &CuttingConfig::default());
        let steps = result.steps();
        assert_eq!(steps.len(), result.optimized.len());
        for (i, (step, point)) in steps.iter().zip(&result.optimized).enumerate() {
            assert_eq!(step.step, i + 1);
            assert_eq!(step.x, point.position.x);
            assert_eq!(step.entity_index, point.entity_index);
        }
    }
}
