//! Integration tests for the quote pipeline.

use approx::assert_relative_eq;
use cutquote_ffi::{QuoteConfig, QuoteRequest, Quoter, ReportStatus};
use rayon::prelude::*;
use serde_json::json;

fn request(material: &str, thickness: f64) -> QuoteRequest {
    serde_json::from_value(json!({
        "entities": [
            {"type": "LINE", "start": [0, 0], "end": [1000, 0]},
            {"type": "CIRCLE", "center": [500, 200], "radius": 50},
            {"type": "ARC", "center": [900, 200], "radius": 40, "start_angle": 0, "end_angle": 180}
        ],
        "material": material,
        "thickness": thickness
    }))
    .unwrap()
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_report_consistency() {
        let report = Quoter::default().quote(&request("steel", 5.0));
        assert_eq!(report.status, ReportStatus::Ok);

        let drawing = report.drawing.unwrap();
        let estimate = report.estimate.unwrap();
        assert_relative_eq!(estimate.cutting_length, drawing.total_length);

        let current = report.alternatives.iter().find(|a| a.is_current).unwrap();
        assert_relative_eq!(current.estimate.total, estimate.total);

        let path = report.path.unwrap();
        assert!(path.optimized_distance <= path.original_distance);
    }

    #[test]
    fn test_request_config_overrides() {
        let mut custom = request("steel", 5.0);
        let mut config = QuoteConfig::default();
        config.cost.setup_cost = 0.0;
        custom.config = Some(config);

        let quoter = Quoter::default();
        let base = quoter.quote(&request("steel", 5.0)).estimate.unwrap();
        let cheaper = quoter.quote(&custom).estimate.unwrap();
        assert_relative_eq!(base.total - cheaper.total, 500.0 * 1.18, epsilon = 1e-9);
        // Only the default-config quote was cached.
        assert_eq!(quoter.cache().len(), 1);
    }

    #[test]
    fn test_json_entry_point() {
        let report = Quoter::default().quote_json(r#"{"entities": "nope"}"#);
        assert_eq!(report.status, ReportStatus::Error);
        assert!(report.error.unwrap().starts_with("Invalid JSON"));
    }
}

mod concurrency_tests {
    use super::*;

    #[test]
    fn test_shared_quoter_across_threads() {
        let quoter = Quoter::default();
        let thicknesses = [1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0];
        let totals: Vec<f64> = thicknesses
            .par_iter()
            .map(|&t| quoter.quote(&request("brass", t)).estimate.unwrap().total)
            .collect();

        assert_eq!(quoter.cache().len(), 3);
        assert_eq!(totals[0], totals[3]);
        assert!(totals[0] < totals[1] && totals[1] < totals[2]);
    }
}

mod profile_tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config: QuoteConfig = serde_json::from_value(json!({
            "nesting": {"spacing": 2.0, "sheets": [
                {"name": "small", "width": 500.0, "height": 500.0, "cost_per_mm2": 0.0002}
            ]},
            "cutting": {"max_2opt_iterations": 10}
        }))
        .unwrap();
        assert_eq!(config.nesting.sheets.len(), 1);
        assert_eq!(config.cutting.max_2opt_iterations, 10);
        assert_eq!(config.cost, Default::default());

        let report = Quoter::new(config).quote(&request("steel", 2.0));
        // The 1000 mm line cannot fit on a 500 mm sheet.
        assert_eq!(report.status, ReportStatus::Partial);
        assert!(report.warnings.iter().any(|w| w.contains("does not fit")));
    }
}
