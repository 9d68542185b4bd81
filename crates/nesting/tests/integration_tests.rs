//! Integration tests for grid nesting.

use approx::assert_relative_eq;
use cutquote_core::{Drawing, Entity};
use cutquote_nesting::{
    Nester, NestingConfig, NestingRecommendation, NestingStatus, Sheet,
};

mod catalog_tests {
    use super::*;

    #[test]
    fn test_standard_part_counts() {
        let result = Nester::default_config().nest(200.0, 100.0).unwrap();
        let counts: Vec<(usize, usize, usize)> = result
            .candidates
            .iter()
            .map(|c| (c.parts_per_row, c.parts_per_col, c.total_parts))
            .collect();
        assert_eq!(
            counts,
            vec![(4, 19, 76), (6, 23, 138), (7, 28, 196), (9, 38, 342)]
        );
    }

    #[test]
    fn test_best_sheet_by_utilization() {
        let result = Nester::default_config().nest(200.0, 100.0).unwrap();
        let best = result.best_candidate().unwrap();
        assert_eq!(best.sheet_name, "1250x2500mm");
        assert_relative_eq!(best.utilization, 0.8832, epsilon = 1e-12);
        assert_eq!(result.layout.len(), 138);
        assert!(!result.layout_truncated);
        assert!(result
            .recommendations
            .contains(&NestingRecommendation::BatchProduction { parts: 138 }));
    }

    #[test]
    fn test_candidate_invariants() {
        let result = Nester::default_config().nest(333.0, 77.0).unwrap();
        for c in &result.candidates {
            assert!((0.0..=1.0).contains(&c.utilization));
            assert_eq!(c.waste, 1.0 - c.utilization);
            match c.cost_per_part {
                Some(cost) => {
                    assert!(c.total_parts > 0);
                    assert!(cost.is_finite() && cost > 0.0);
                }
                None => assert_eq!(c.total_parts, 0),
            }
        }
    }
}

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_oversized_part() {
        let result = Nester::default_config().nest(5000.0, 5000.0).unwrap();
        assert_eq!(result.status, NestingStatus::NoCandidateFits);
        assert!(result.best.is_none());
        assert_eq!(result.candidates.len(), 4);
        assert!(result.candidates.iter().all(|c| c.cost_per_part.is_none()));
    }

    #[test]
    fn test_empty_drawing_is_degenerate() {
        let drawing = Drawing::from_entities(Vec::new());
        let result = Nester::default_config().nest_drawing(&drawing).unwrap();
        assert_eq!(result.status, NestingStatus::DegeneratePart);
    }

    #[test]
    fn test_single_line_is_degenerate() {
        let drawing = Drawing::from_entities(vec![Entity::line((0.0, 0.0), (100.0, 0.0))]);
        let result = Nester::default_config().nest_drawing(&drawing).unwrap();
        assert_eq!(result.status, NestingStatus::DegeneratePart);
    }

    #[test]
    fn test_invalid_sheet_rejected() {
        let config = NestingConfig::new().with_sheet(Sheet::rectangle(-1.0, 100.0));
        let err = Nester::new(config).nest(10.0, 10.0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_layout_limit() {
        let config = NestingConfig::new().with_max_layout_parts(50);
        let result = Nester::new(config).nest(10.0, 10.0).unwrap();
        assert_eq!(result.layout.len(), 50);
        assert!(result.layout_truncated);
        assert!(result.best_candidate().unwrap().total_parts > 50);
    }
}

mod drawing_tests {
    use super::*;

    #[test]
    fn test_rectangle_drawing() {
        let drawing = Drawing::from_entities(vec![
            Entity::line((0.0, 0.0), (200.0, 0.0)),
            Entity::line((200.0, 0.0), (200.0, 100.0)),
            Entity::line((200.0, 100.0), (0.0, 100.0)),
            Entity::line((0.0, 100.0), (0.0, 0.0)),
        ]);
        let config = NestingConfig::new().with_sheets(vec![Sheet::rectangle(1000.0, 2000.0)]);
        let result = Nester::new(config).nest_drawing(&drawing).unwrap();
        assert_eq!(result.status, NestingStatus::Placed);
        assert_eq!(result.best_candidate().unwrap().total_parts, 76);
        let last = result.layout.last().unwrap();
        assert_eq!(last.part_number, 76);
        assert_relative_eq!(last.x, 5.0 + 3.0 * 205.0);
        assert_relative_eq!(last.y, 5.0 + 18.0 * 105.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_serializes() {
        let result = Nester::default_config().nest(200.0, 100.0).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "placed");
        assert_eq!(json["candidates"][0]["total_parts"], 76);
        assert_eq!(json["recommendations"][0]["kind"], "batch_production");
    }
}
