//! The quote pipeline.
//!
//! Parses a drawing once, prices it, then runs path and nesting optimization
//! side by side over the same read-only drawing.

use std::time::Instant;

use cutquote_core::{Drawing, Result};
use cutquote_cost::{CostAdvice, CostEstimator, Material};
use cutquote_cutting::{optimize_path, PathResult};
use cutquote_nesting::{Nester, NestingResult, NestingStatus};

use crate::cache::{QuoteCache, QuoteKey, DEFAULT_CACHE_CAPACITY};
use crate::types::{DrawingSummary, QuoteConfig, QuoteReport, QuoteRequest};

/// Runs quotes with fixed stage settings and caches the reports.
#[derive(Debug)]
pub struct Quoter {
    config: QuoteConfig,
    estimator: CostEstimator,
    nester: Nester,
    cache: QuoteCache,
}

impl Quoter {
    pub fn new(config: QuoteConfig) -> Self {
        Self::with_cache_capacity(config, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(config: QuoteConfig, capacity: usize) -> Self {
        Self {
            estimator: CostEstimator::new(config.cost.clone()),
            nester: Nester::new(config.nesting.clone()),
            config,
            cache: QuoteCache::new(capacity),
        }
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Quotes a JSON request. Malformed input yields an error report.
    pub fn quote_json(&self, request_json: &str) -> QuoteReport {
        match serde_json::from_str::<QuoteRequest>(request_json) {
            Ok(request) => self.quote(&request),
            Err(e) => QuoteReport::failure(format!("Invalid JSON: {}", e)),
        }
    }

    /// Quotes a request.
    ///
    /// A request carrying its own settings is quoted by a one-off quoter and
    /// bypasses this cache.
    pub fn quote(&self, request: &QuoteRequest) -> QuoteReport {
        let drawing = Drawing::from_json_values(&request.entities);
        let mut report = match &request.config {
            Some(config) if *config != self.config => {
                Quoter::with_cache_capacity(config.clone(), 0).quote_drawing(
                    &drawing,
                    &request.material,
                    request.thickness,
                )
            }
            _ => self.quote_drawing(&drawing, &request.material, request.thickness),
        };
        if !request.include_path {
            report.path = None;
        }
        if !request.include_nesting {
            report.nesting = None;
        }
        report
    }

    /// Quotes a parsed drawing, reusing a cached report when the same
    /// drawing, material and thickness were quoted before.
    pub fn quote_drawing(&self, drawing: &Drawing, material: &str, thickness: f64) -> QuoteReport {
        let material: Material = match material.parse() {
            Ok(m) => m,
            Err(e) => return QuoteReport::failure(e.to_string()),
        };

        let key = QuoteKey::new(drawing.content_digest(), material, thickness);
        if let Some(report) = self.cache.get(&key) {
            log::debug!("quote cache hit {:016x}", key.digest);
            return report;
        }

        let report = self.build_report(drawing, material, thickness);
        if report.is_success() {
            self.cache.insert(key, report.clone());
        }
        report
    }

    fn build_report(&self, drawing: &Drawing, material: Material, thickness: f64) -> QuoteReport {
        let start = Instant::now();
        let mut report = QuoteReport::new();
        report.drawing = Some(DrawingSummary::from(drawing));

        for skipped in drawing.skipped() {
            report.warn(format!(
                "record {} ({}) skipped: {}",
                skipped.index, skipped.entity_type, skipped.reason
            ));
        }

        let length = drawing.total_length();
        let priced = self.estimator.estimate_length(length, material, thickness).and_then(|estimate| {
            let alternatives = self.estimator.compare_materials(length, material, thickness)?;
            Ok((estimate, alternatives))
        });
        let (estimate, alternatives) = match priced {
            Ok(priced) => priced,
            Err(e) => {
                report.fail(e.to_string());
                report.computation_time_ms = start.elapsed().as_millis() as u64;
                return report;
            }
        };
        report.advice = Some(CostAdvice::analyze(drawing, &estimate, &alternatives));
        report.estimate = Some(estimate);
        report.alternatives = alternatives;

        let (path, nesting) = rayon::join(
            || optimize_path(drawing, &self.config.cutting),
            || self.nester.nest_drawing(drawing),
        );
        record_path(&mut report, path);
        record_nesting(&mut report, nesting);

        report.computation_time_ms = start.elapsed().as_millis() as u64;
        report
    }
}

impl Default for Quoter {
    fn default() -> Self {
        Self::new(QuoteConfig::default())
    }
}

fn record_path(report: &mut QuoteReport, path: PathResult) {
    if path.status.is_capped() {
        report.warn(format!(
            "path optimization capped ({:?}) at {} points",
            path.status,
            path.len()
        ));
    }
    report.path = Some(path);
}

fn record_nesting(report: &mut QuoteReport, nesting: Result<NestingResult>) {
    match nesting {
        Ok(nesting) => {
            match nesting.status {
                NestingStatus::Placed => {}
                NestingStatus::NoCandidateFits => {
                    report.warn("part does not fit on any candidate sheet")
                }
                NestingStatus::DegeneratePart => report.warn("part has zero area; nesting skipped"),
            }
            // A capped layout still carries every candidate count; callers read
            // `layout_truncated`.
            report.nesting = Some(nesting);
        }
        Err(e) => report.warn(format!("nesting failed: {}", e)),
    }
}
