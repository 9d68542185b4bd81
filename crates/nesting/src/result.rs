//! Result types for grid nesting.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid evaluation of one part on one sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetCandidate {
    /// Sheet name.
    pub sheet_name: String,
    pub sheet_width: f64,
    pub sheet_height: f64,
    /// Parts along the sheet width.
    pub parts_per_row: usize,
    /// Parts along the sheet height.
    pub parts_per_col: usize,
    /// `parts_per_row * parts_per_col`; 0 means the part does not fit.
    pub total_parts: usize,
    /// Placed part area over sheet area, in `[0, 1]`.
    pub utilization: f64,
    /// `1 - utilization`.
    pub waste: f64,
    /// Unused sheet area in mm².
    pub waste_area: f64,
    /// Price of the whole sheet.
    pub sheet_cost: f64,
    /// Sheet cost split over the parts; `None` when nothing fits.
    pub cost_per_part: Option<f64>,
    /// Parts that would fit with the part rotated 90 degrees.
    pub rotated_parts: usize,
}

impl SheetCandidate {
    /// Returns true if at least one part fits.
    pub fn fits(&self) -> bool {
        self.total_parts > 0
    }
}

/// One placed part in the layout of the best sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartPlacement {
    /// 1-based part number, row-major.
    pub part_number: usize,
    /// Lower-left X on the sheet.
    pub x: f64,
    /// Lower-left Y on the sheet.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Outcome of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NestingStatus {
    /// A best sheet was selected and laid out.
    Placed,
    /// The part does not fit on any candidate sheet.
    NoCandidateFits,
    /// The part has zero area.
    DegeneratePart,
}

/// Rule-based advice about the selected sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NestingRecommendation {
    /// Utilization below 50%.
    LowUtilization { utilization: f64 },
    /// Waste above 30%.
    HighWaste { waste: f64 },
    /// More than 10 parts per sheet.
    BatchProduction { parts: usize },
    /// Rotating the part 90 degrees fits more parts.
    RotateForMoreParts { rotated: usize, current: usize },
}

impl fmt::Display for NestingRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestingRecommendation::LowUtilization { utilization } => write!(
                f,
                "Low sheet utilization ({:.1}%); consider rotating parts 90 degrees",
                utilization * 100.0
            ),
            NestingRecommendation::HighWaste { waste } => write!(
                f,
                "High waste ({:.1}%); consider a custom sheet size",
                waste * 100.0
            ),
            NestingRecommendation::BatchProduction { parts } => write!(
                f,
                "Good for batch production: {} parts per sheet",
                parts
            ),
            NestingRecommendation::RotateForMoreParts { rotated, current } => write!(
                f,
                "Rotating parts 90 degrees would fit {} parts (vs {} current)",
                rotated, current
            ),
        }
    }
}

/// Result of nesting one part over a sheet catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingResult {
    pub part_width: f64,
    pub part_height: f64,
    pub part_area: f64,

    /// Spacing used, in mm.
    pub spacing: f64,

    /// One candidate per catalog sheet, in catalog order.
    pub candidates: Vec<SheetCandidate>,

    /// Index of the selected candidate.
    pub best: Option<usize>,

    /// Grid layout on the selected sheet.
    pub layout: Vec<PartPlacement>,

    /// True when the layout was cut short by the layout size limit.
    pub layout_truncated: bool,

    /// Outcome.
    pub status: NestingStatus,

    /// Advice about the selected sheet.
    pub recommendations: Vec<NestingRecommendation>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl NestingResult {
    /// Creates a result with no selection.
    pub fn unplaced(part_width: f64, part_height: f64, spacing: f64, status: NestingStatus) -> Self {
        Self {
            part_width,
            part_height,
            part_area: part_width * part_height,
            spacing,
            candidates: Vec::new(),
            best: None,
            layout: Vec::new(),
            layout_truncated: false,
            status,
            recommendations: Vec::new(),
            computation_time_ms: 0,
        }
    }

    /// The selected candidate, if any.
    pub fn best_candidate(&self) -> Option<&SheetCandidate> {
        self.best.and_then(|i| self.candidates.get(i))
    }

    /// Returns true if a sheet was selected.
    pub fn is_placed(&self) -> bool {
        self.status == NestingStatus::Placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unplaced_result() {
        let result = NestingResult::unplaced(0.0, 10.0, 5.0, NestingStatus::DegeneratePart);
        assert!(result.best_candidate().is_none());
        assert!(!result.is_placed());
        assert_eq!(result.part_area, 0.0);
    }

    #[test]
    fn test_recommendation_messages() {
        let rec = NestingRecommendation::RotateForMoreParts { rotated: 80, current: 76 };
        assert_eq!(rec.to_string(), "Rotating parts 90 degrees would fit 80 parts (vs 76 current)");
        let low = NestingRecommendation::LowUtilization { utilization: 0.25 };
        assert!(low.to_string().contains("25.0%"));
    }
}
