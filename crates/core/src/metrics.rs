//! Aggregate drawing metrics and the complexity score.
//!
//! The score is a weighted sum of six normalized factors, scaled to `[0, 100]`:
//!
//! | Factor | Weight | Normalization |
//! |--------|--------|---------------|
//! | Entity count | 30% | `min(1, n / 300)` |
//! | Type diversity | 20% | distinct cutting kinds / 6 |
//! | Layer count | 15% | `min(1, layers / 7.5)` |
//! | Curves | 20% | `min(1, curved / 20)` |
//! | Drawing size | 10% | bounding-box area bands |
//! | Density | 5% | `min(1, peak_density / 5)` |
//!
//! Every factor is non-decreasing as entities are appended, so the score is
//! too. Density uses the peak of the running `cutting / bbox area` ratio over
//! the drawing's entity order rather than the final ratio, which would drop
//! whenever a new entity enlarges the box.

use crate::entity::{Entity, EntityType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entity count at which the count factor saturates.
pub const ENTITY_COUNT_SATURATION: f64 = 300.0;
/// Layer count at which the layer factor saturates.
pub const LAYER_SATURATION: f64 = 7.5;
/// Curved entity count at which the curve factor saturates.
pub const CURVE_SATURATION: f64 = 20.0;
/// Entities per mm² at which the density factor saturates.
pub const DENSITY_SATURATION: f64 = 5.0;

const WEIGHT_COUNT: f64 = 0.30;
const WEIGHT_TYPES: f64 = 0.20;
const WEIGHT_LAYERS: f64 = 0.15;
const WEIGHT_CURVES: f64 = 0.20;
const WEIGHT_SIZE: f64 = 0.10;
const WEIGHT_DENSITY: f64 = 0.05;

/// The aggregates the complexity score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComplexityInputs {
    /// Number of cutting entities (everything except text and block references).
    pub cutting_entities: usize,
    /// Number of distinct cutting entity kinds present.
    pub distinct_cutting_types: usize,
    /// Number of distinct layers.
    pub layers: usize,
    /// Number of arcs, splines and ellipses.
    pub curved_entities: usize,
    /// Bounding-box area in mm².
    pub area: f64,
    /// Highest running cutting-entities-per-mm² ratio seen while folding
    /// entities into the bounding box in order.
    pub peak_density: f64,
}

/// Per-factor breakdown, each in `[0, 1]` before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplexityFactors {
    pub entity_count: f64,
    pub type_diversity: f64,
    pub layers: f64,
    pub curves: f64,
    pub size: f64,
    pub density: f64,
}

impl ComplexityFactors {
    /// Normalizes the raw aggregates.
    pub fn from_inputs(inputs: &ComplexityInputs) -> Self {
        let n = inputs.cutting_entities as f64;
        let area = if inputs.area.is_finite() { inputs.area.max(0.0) } else { 0.0 };
        let density = if inputs.peak_density.is_finite() {
            (inputs.peak_density.max(0.0) / DENSITY_SATURATION).min(1.0)
        } else {
            0.0
        };
        Self {
            entity_count: (n / ENTITY_COUNT_SATURATION).min(1.0),
            type_diversity: (inputs.distinct_cutting_types as f64 / EntityType::CUTTING.len() as f64).min(1.0),
            layers: (inputs.layers as f64 / LAYER_SATURATION).min(1.0),
            curves: (inputs.curved_entities as f64 / CURVE_SATURATION).min(1.0),
            size: size_band(area),
            density,
        }
    }

    /// Weighted sum scaled to `[0, 100]`.
    pub fn score(&self) -> f64 {
        let weighted = self.entity_count * WEIGHT_COUNT
            + self.type_diversity * WEIGHT_TYPES
            + self.layers * WEIGHT_LAYERS
            + self.curves * WEIGHT_CURVES
            + self.size * WEIGHT_SIZE
            + self.density * WEIGHT_DENSITY;
        (weighted * 100.0).clamp(0.0, 100.0)
    }
}

fn size_band(area: f64) -> f64 {
    if area <= 0.0 {
        0.0
    } else if area <= 1e4 {
        0.2
    } else if area <= 1e5 {
        0.5
    } else if area <= 1e6 {
        0.7
    } else {
        1.0
    }
}

/// Complexity score in `[0, 100]`. Pure and deterministic.
pub fn complexity_score(inputs: &ComplexityInputs) -> f64 {
    ComplexityFactors::from_inputs(inputs).score()
}

/// Summary statistics reported alongside a drawing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplexityMetrics {
    /// Number of cutting entities.
    pub total_cutting_entities: usize,
    /// Cutting entities per mm² of bounding box (0 for an empty box).
    pub entity_density: f64,
    pub avg_line_length: f64,
    pub min_line_length: f64,
    pub max_line_length: f64,
    pub avg_arc_length: f64,
    pub avg_circle_circumference: f64,
    /// Number of distinct layers.
    pub layer_count: usize,
    /// Normalized factor breakdown.
    pub factors: ComplexityFactors,
    /// Weighted complexity score in `[0, 100]`.
    pub complexity_score: f64,
}

impl ComplexityMetrics {
    /// Computes metrics for a set of entities.
    pub fn compute(entities: &[Entity], inputs: &ComplexityInputs) -> Self {
        let lines: Vec<f64> = lengths_of(entities, EntityType::Line).collect();
        let (min_line, max_line) = if lines.is_empty() {
            (0.0, 0.0)
        } else {
            lines
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &l| (lo.min(l), hi.max(l)))
        };

        let factors = ComplexityFactors::from_inputs(inputs);
        let area = inputs.area;
        Self {
            total_cutting_entities: inputs.cutting_entities,
            entity_density: if area > 0.0 {
                inputs.cutting_entities as f64 / area
            } else {
                0.0
            },
            avg_line_length: mean(lines.iter().copied()),
            min_line_length: min_line,
            max_line_length: max_line,
            avg_arc_length: mean(lengths_of(entities, EntityType::Arc)),
            avg_circle_circumference: mean(lengths_of(entities, EntityType::Circle)),
            layer_count: inputs.layers,
            factors,
            complexity_score: factors.score(),
        }
    }
}

fn lengths_of(entities: &[Entity], ty: EntityType) -> impl Iterator<Item = f64> + '_ {
    entities
        .iter()
        .filter(move |e| e.entity_type() == ty)
        .map(Entity::length)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_drawing_scores_zero() {
        assert_eq!(complexity_score(&ComplexityInputs::default()), 0.0);
    }

    #[test]
    fn test_rectangle_score() {
        // Four lines forming a 100x50 rectangle on one layer.
        let inputs = ComplexityInputs {
            cutting_entities: 4,
            distinct_cutting_types: 1,
            layers: 1,
            curved_entities: 0,
            area: 5000.0,
            peak_density: 4.0 / 5000.0,
        };
        let expected = (4.0 / 300.0 * 0.3 + 0.2 / 6.0 + 0.15 / 7.5 + 0.02 + (4.0 / 5000.0 / 5.0) * 0.05) * 100.0;
        let score = complexity_score(&inputs);
        assert_relative_eq!(score, expected, epsilon = 1e-9);
        assert!(score < 25.0);
    }

    #[test]
    fn test_saturation() {
        let inputs = ComplexityInputs {
            cutting_entities: 6_000_000,
            distinct_cutting_types: 6,
            layers: 40,
            curved_entities: 500,
            area: 1.1e6,
            peak_density: 10.0,
        };
        assert_relative_eq!(complexity_score(&inputs), 100.0);
    }

    #[test]
    fn test_density_uses_peak() {
        let dense = ComplexityInputs {
            cutting_entities: 11,
            distinct_cutting_types: 1,
            layers: 1,
            curved_entities: 0,
            area: 100.0,
            peak_density: 11.0,
        };
        let factors = ComplexityFactors::from_inputs(&dense);
        assert_relative_eq!(factors.density, 1.0);
        let unknown = ComplexityInputs {
            peak_density: f64::NAN,
            ..dense
        };
        assert_eq!(ComplexityFactors::from_inputs(&unknown).density, 0.0);
    }

    #[test]
    fn test_size_bands() {
        assert_eq!(size_band(0.0), 0.0);
        assert_eq!(size_band(1e4), 0.2);
        assert_eq!(size_band(1e4 + 1.0), 0.5);
        assert_eq!(size_band(1e6), 0.7);
        assert_eq!(size_band(2e6), 1.0);
    }

    #[test]
    fn test_line_statistics() {
        let entities = vec![
            Entity::line((0.0, 0.0), (10.0, 0.0)),
            Entity::line((0.0, 0.0), (30.0, 0.0)),
            Entity::circle((0.0, 0.0), 1.0),
        ];
        let metrics = ComplexityMetrics::compute(
            &entities,
            &ComplexityInputs {
                cutting_entities: 3,
                distinct_cutting_types: 2,
                layers: 1,
                curved_entities: 0,
                area: 0.0,
                peak_density: 0.0,
            },
        );
        assert_relative_eq!(metrics.avg_line_length, 20.0);
        assert_relative_eq!(metrics.min_line_length, 10.0);
        assert_relative_eq!(metrics.max_line_length, 30.0);
        assert_relative_eq!(metrics.avg_circle_circumference, std::f64::consts::TAU);
        assert_eq!(metrics.avg_arc_length, 0.0);
        assert_eq!(metrics.entity_density, 0.0);
    }
}
