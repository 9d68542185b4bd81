//! Grid nesting of a single rectangular part.

use std::time::Instant;

use cutquote_core::{Drawing, Error, Result};

use crate::config::NestingConfig;
use crate::result::{
    NestingRecommendation, NestingResult, NestingStatus, PartPlacement, SheetCandidate,
};
use crate::sheet::Sheet;

/// Utilization below which a sheet is flagged.
const LOW_UTILIZATION: f64 = 0.5;
/// Waste above which a sheet is flagged.
const HIGH_WASTE: f64 = 0.3;
/// Parts per sheet above which batch production is suggested.
const BATCH_PARTS: usize = 10;
/// Largest grid counted on one sheet.
const MAX_PARTS_PER_SHEET: usize = u32::MAX as usize;

/// Grid nester.
///
/// Places copies of one axis-aligned part in a regular grid on each sheet of
/// the catalog and picks the sheet with the best material utilization.
#[derive(Debug, Clone, Default)]
pub struct Nester {
    config: NestingConfig,
}

impl Nester {
    /// Creates a new nester with the given configuration.
    pub fn new(config: NestingConfig) -> Self {
        Self { config }
    }

    /// Creates a nester with default configuration.
    pub fn default_config() -> Self {
        Self::new(NestingConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NestingConfig {
        &self.config
    }

    /// Nests the bounding box of a drawing.
    pub fn nest_drawing(&self, drawing: &Drawing) -> Result<NestingResult> {
        let bbox = drawing.bounding_box();
        self.nest(bbox.width(), bbox.height())
    }

    /// Nests a `width` x `height` part over every sheet in the catalog.
    ///
    /// A zero-area part yields [`NestingStatus::DegeneratePart`]; a part that
    /// fits nowhere yields [`NestingStatus::NoCandidateFits`]. Neither is an
    /// error.
    pub fn nest(&self, width: f64, height: f64) -> Result<NestingResult> {
        let start = Instant::now();
        self.validate(width, height)?;

        let spacing = self.config.spacing;
        if width * height == 0.0 {
            log::warn!("degenerate part {} x {}; skipping nesting", width, height);
            return Ok(NestingResult::unplaced(
                width,
                height,
                spacing,
                NestingStatus::DegeneratePart,
            ));
        }

        let candidates = self
            .config
            .sheets
            .iter()
            .map(|sheet| evaluate_sheet(sheet, width, height, spacing))
            .collect::<Result<Vec<SheetCandidate>>>()?;

        let best = select_best(&candidates);
        let mut result =
            NestingResult::unplaced(width, height, spacing, NestingStatus::NoCandidateFits);

        match best.map(|i| &candidates[i]) {
            Some(chosen) => {
                let (layout, truncated) =
                    grid_layout(chosen, width, height, spacing, self.config.max_layout_parts);
                if truncated {
                    log::warn!(
                        "layout limited to {} of {} parts",
                        layout.len(),
                        chosen.total_parts
                    );
                }
                log::debug!(
                    "best sheet {}: {} parts, {:.1}% utilization",
                    chosen.sheet_name,
                    chosen.total_parts,
                    chosen.utilization * 100.0
                );
                result.recommendations = recommend(chosen);
                result.layout = layout;
                result.layout_truncated = truncated;
                result.status = NestingStatus::Placed;
            }
            None => log::debug!("part {} x {} fits on no candidate sheet", width, height),
        }
        result.best = best;
        result.candidates = candidates;

        result.computation_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    fn validate(&self, width: f64, height: f64) -> Result<()> {
        if !(width.is_finite() && width >= 0.0 && height.is_finite() && height >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "part dimensions must be finite and non-negative, got {} x {}",
                width, height
            )));
        }
        let spacing = self.config.spacing;
        if !(spacing.is_finite() && spacing >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "spacing must be finite and non-negative, got {}",
                spacing
            )));
        }
        if self.config.sheets.is_empty() {
            return Err(Error::InvalidInput("sheet catalog is empty".into()));
        }
        self.config.sheets.iter().try_for_each(Sheet::validate)
    }
}

/// Number of `part + spacing` cells along a sheet edge, leaving `spacing` at the start.
fn fit_count(sheet_len: f64, part_len: f64, spacing: f64) -> usize {
    let cell = part_len + spacing;
    if cell <= 0.0 {
        return 0;
    }
    ((sheet_len - spacing) / cell).floor().max(0.0) as usize
}

/// Parts in a `rows x cols` grid, or an error when the grid cannot be counted.
fn grid_count(sheet: &Sheet, per_row: usize, per_col: usize) -> Result<usize> {
    per_row
        .checked_mul(per_col)
        .filter(|&total| total <= MAX_PARTS_PER_SHEET)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "part too small to count on sheet {}: {} x {} grid",
                sheet.name, per_row, per_col
            ))
        })
}

fn evaluate_sheet(sheet: &Sheet, width: f64, height: f64, spacing: f64) -> Result<SheetCandidate> {
    let parts_per_row = fit_count(sheet.width, width, spacing);
    let parts_per_col = fit_count(sheet.height, height, spacing);
    let total_parts = grid_count(sheet, parts_per_row, parts_per_col)?;

    let sheet_area = sheet.area();
    let used_area = total_parts as f64 * width * height;
    let utilization = (used_area / sheet_area).clamp(0.0, 1.0);
    let sheet_cost = sheet.cost();
    let cost_per_part = (total_parts > 0).then(|| sheet_cost / total_parts as f64);

    let rotated_parts = grid_count(
        sheet,
        fit_count(sheet.width, height, spacing),
        fit_count(sheet.height, width, spacing),
    )?;

    Ok(SheetCandidate {
        sheet_name: sheet.name.clone(),
        sheet_width: sheet.width,
        sheet_height: sheet.height,
        parts_per_row,
        parts_per_col,
        total_parts,
        utilization,
        waste: 1.0 - utilization,
        waste_area: (sheet_area - used_area).max(0.0),
        sheet_cost,
        cost_per_part,
        rotated_parts,
    })
}

/// Highest utilization among fitting candidates; ties go to the cheaper part.
fn select_best(candidates: &[SheetCandidate]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let Some(cost) = candidate.cost_per_part else {
            continue;
        };
        let better = match best {
            None => true,
            Some(b) => {
                let current = &candidates[b];
                let current_cost = current.cost_per_part.unwrap_or(f64::INFINITY);
                candidate.utilization > current.utilization
                    || (candidate.utilization == current.utilization && cost < current_cost)
            }
        };
        if better {
            best = Some(i);
        }
    }
    best
}

fn grid_layout(
    candidate: &SheetCandidate,
    width: f64,
    height: f64,
    spacing: f64,
    limit: usize,
) -> (Vec<PartPlacement>, bool) {
    let count = candidate.total_parts.min(limit);
    let layout = (0..count)
        .map(|i| {
            let row = i / candidate.parts_per_row;
            let col = i % candidate.parts_per_row;
            PartPlacement {
                part_number: i + 1,
                x: spacing + col as f64 * (width + spacing),
                y: spacing + row as f64 * (height + spacing),
                width,
                height,
            }
        })
        .collect();
    (layout, count < candidate.total_parts)
}

fn recommend(best: &SheetCandidate) -> Vec<NestingRecommendation> {
    let mut recommendations = Vec::new();
    if best.utilization < LOW_UTILIZATION {
        recommendations.push(NestingRecommendation::LowUtilization {
            utilization: best.utilization,
        });
    }
    if best.waste > HIGH_WASTE {
        recommendations.push(NestingRecommendation::HighWaste { waste: best.waste });
    }
    if best.total_parts > BATCH_PARTS {
        recommendations.push(NestingRecommendation::BatchProduction {
            parts: best.total_parts,
        });
    }
    if best.rotated_parts > best.total_parts {
        recommendations.push(NestingRecommendation::RotateForMoreParts {
            rotated: best.rotated_parts,
            current: best.total_parts,
        });
    }
    recommendations
}
