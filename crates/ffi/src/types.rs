//! Request and report types for the quote pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cutquote_core::{BoundingBox, ComplexityMetrics, Drawing, EntityCounts, LayerStats};
use cutquote_cost::{CostAdvice, CostConfig, CostEstimate, MaterialAlternative};
use cutquote_cutting::{CuttingConfig, PathResult};
use cutquote_nesting::{NestingConfig, NestingResult};

/// API version.
pub const API_VERSION: &str = "1.0";

/// Settings for every pipeline stage.
///
/// Doubles as the shop profile format:
///
/// ```toml
/// [cost]
/// setup_cost = 650.0
///
/// [cost.materials.steel]
/// feed_rate = 280.0
/// cost_per_cm3 = 0.9
/// hourly_rate = 1400.0
///
/// [nesting]
/// spacing = 3.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub cost: CostConfig,
    pub cutting: CuttingConfig,
    pub nesting: NestingConfig,
}

/// A quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// API version.
    #[serde(default)]
    pub version: Option<String>,

    /// Entity records, as produced by the drawing parser.
    pub entities: Vec<serde_json::Value>,

    /// Material name, e.g. "steel".
    #[serde(default = "default_material")]
    pub material: String,

    /// Stock thickness in mm.
    pub thickness: f64,

    /// Stage settings; defaults when absent.
    #[serde(default)]
    pub config: Option<QuoteConfig>,

    /// Run the path optimizer.
    #[serde(default = "default_true")]
    pub include_path: bool,

    /// Run the nesting optimizer.
    #[serde(default = "default_true")]
    pub include_nesting: bool,
}

fn default_material() -> String {
    "steel".to_string()
}

fn default_true() -> bool {
    true
}

/// Overall report outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Every stage completed.
    Ok,
    /// A result was produced but some stage skipped input or hit a cap.
    Partial,
    /// No estimate could be produced.
    Error,
}

/// Drawing summary for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSummary {
    pub entity_count: usize,
    pub skipped_count: usize,
    pub total_length: f64,
    pub bounding_box: BoundingBox,
    pub counts: EntityCounts,
    pub layers: BTreeMap<String, LayerStats>,
    pub complexity_score: f64,
    pub metrics: ComplexityMetrics,
}

impl From<&Drawing> for DrawingSummary {
    fn from(drawing: &Drawing) -> Self {
        Self {
            entity_count: drawing.len(),
            skipped_count: drawing.skipped().len(),
            total_length: drawing.total_length(),
            bounding_box: drawing.bounding_box(),
            counts: drawing.counts().clone(),
            layers: drawing.layer_stats().clone(),
            complexity_score: drawing.complexity_score(),
            metrics: drawing.metrics().clone(),
        }
    }
}

/// The full quote for one drawing, material and thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteReport {
    /// API version.
    pub version: String,

    pub status: ReportStatus,

    /// Error message when `status` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Non-fatal issues: skipped records, caps, unplaced nesting.
    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default)]
    pub drawing: Option<DrawingSummary>,

    #[serde(default)]
    pub estimate: Option<CostEstimate>,

    /// Every material priced for the same job, cheapest first.
    #[serde(default)]
    pub alternatives: Vec<MaterialAlternative>,

    #[serde(default)]
    pub advice: Option<CostAdvice>,

    #[serde(default)]
    pub path: Option<PathResult>,

    #[serde(default)]
    pub nesting: Option<NestingResult>,

    /// Computation time in milliseconds.
    #[serde(default)]
    pub computation_time_ms: u64,
}

impl QuoteReport {
    /// Creates an empty successful report.
    pub fn new() -> Self {
        Self {
            version: API_VERSION.to_string(),
            status: ReportStatus::Ok,
            error: None,
            warnings: Vec::new(),
            drawing: None,
            estimate: None,
            alternatives: Vec::new(),
            advice: None,
            path: None,
            nesting: None,
            computation_time_ms: 0,
        }
    }

    /// Creates an error report.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.fail(message);
        report
    }

    /// Marks the report as failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = ReportStatus::Error;
        self.error = Some(message.into());
    }

    /// Records a non-fatal issue; an `ok` report becomes `partial`.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
        if self.status == ReportStatus::Ok {
            self.status = ReportStatus::Partial;
        }
    }

    /// Returns true unless the report failed.
    pub fn is_success(&self) -> bool {
        self.status != ReportStatus::Error
    }
}

impl Default for QuoteReport {
    fn default() -> Self {
        Self::new()
    }
}
