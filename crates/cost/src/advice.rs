//! Rule-based cost advice derived from an estimate and the material comparison.

use cutquote_core::{Drawing, EntityType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::compare::MaterialAlternative;
use crate::estimator::CostEstimate;

/// Complexity score above which the geometry counts as complex.
pub const HIGH_COMPLEXITY: f64 = 70.0;
/// Spline count above which converting splines to arcs is suggested.
pub const MANY_SPLINES: usize = 10;
/// Thickness (mm) above which a thinner stock is suggested.
pub const THICK_STOCK: f64 = 2.0;
/// Ratio at which one cost component is considered the main driver.
const DRIVER_RATIO: f64 = 1.5;

/// What dominates the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostDriver {
    /// Labor dominates: long machining time.
    MachiningTime,
    /// Material dominates: expensive stock.
    Material,
    /// Geometry complexity slows machining.
    Complexity,
}

/// Suggestion priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Medium,
    High,
}

/// A design change that may lower the price.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignSuggestion {
    pub suggestion: String,
    pub reason: String,
    pub priority: Priority,
}

/// Advice for one quote.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostAdvice {
    /// Main cost drivers.
    pub drivers: Vec<CostDriver>,
    /// Design suggestions.
    pub suggestions: Vec<DesignSuggestion>,
    /// Cheapest material when it beats the current one.
    pub cheapest_alternative: Option<MaterialAlternative>,
    /// Savings of the cheapest alternative as a share of the current total, in percent.
    pub potential_savings_pct: f64,
}

impl CostAdvice {
    /// Derives advice from a drawing, its estimate and the sorted material comparison.
    pub fn analyze(drawing: &Drawing, estimate: &CostEstimate, alternatives: &[MaterialAlternative]) -> Self {
        let complexity = drawing.complexity_score();

        let mut drivers = Vec::new();
        if estimate.labor_cost > estimate.material_cost * DRIVER_RATIO {
            drivers.push(CostDriver::MachiningTime);
        }
        if estimate.material_cost > estimate.labor_cost * DRIVER_RATIO {
            drivers.push(CostDriver::Material);
        }
        if complexity > HIGH_COMPLEXITY {
            drivers.push(CostDriver::Complexity);
        }

        let mut suggestions = Vec::new();
        if estimate.thickness > THICK_STOCK {
            suggestions.push(DesignSuggestion {
                suggestion: format!(
                    "Consider reducing thickness from {} mm to {} mm",
                    estimate.thickness,
                    estimate.thickness - 0.5
                ),
                reason: "Thinner stock removes less material".to_string(),
                priority: Priority::Medium,
            });
        }
        if complexity > HIGH_COMPLEXITY {
            suggestions.push(DesignSuggestion {
                suggestion: "Simplify geometry by reducing splines and complex curves".to_string(),
                reason: format!("Complexity score {:.0} requires slower machining", complexity),
                priority: Priority::High,
            });
        }
        let splines = drawing.counts().get(EntityType::Spline);
        if splines > MANY_SPLINES {
            suggestions.push(DesignSuggestion {
                suggestion: "Convert splines to arcs where possible".to_string(),
                reason: format!("{} splines; arcs machine faster", splines),
                priority: Priority::Medium,
            });
        }

        let cheapest_alternative = alternatives
            .first()
            .filter(|alt| !alt.is_current && alt.savings > 0.0)
            .cloned();
        let potential_savings_pct = match &cheapest_alternative {
            Some(alt) if estimate.total > 0.0 => alt.savings / estimate.total * 100.0,
            _ => 0.0,
        };

        Self {
            drivers,
            suggestions,
            cheapest_alternative,
            potential_savings_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CostEstimator, Material};
    use cutquote_core::Entity;

    #[test]
    fn test_labor_driven_steel_job() {
        let drawing = Drawing::from_entities(vec![Entity::line((0.0, 0.0), (1000.0, 0.0))]);
        let estimator = CostEstimator::default();
        let estimate = estimator.estimate(&drawing, "steel", 5.0).unwrap();
        let alternatives = estimator.compare_materials(drawing.total_length(), Material::Steel, 5.0).unwrap();

        let advice = CostAdvice::analyze(&drawing, &estimate, &alternatives);
        assert_eq!(advice.drivers, vec![CostDriver::MachiningTime]);
        assert_eq!(advice.suggestions.len(), 1);
        let cheapest = advice.cheapest_alternative.expect("a cheaper material exists");
        assert_eq!(cheapest.estimate.material, Material::Wood);
        assert!(advice.potential_savings_pct > 0.0);
    }

    #[test]
    fn test_cheapest_current_material_has_no_alternative() {
        let drawing = Drawing::from_entities(vec![Entity::line((0.0, 0.0), (100.0, 0.0))]);
        let estimator = CostEstimator::default();
        let estimate = estimator.estimate(&drawing, "wood", 1.0).unwrap();
        let alternatives = estimator.compare_materials(100.0, Material::Wood, 1.0).unwrap();

        let advice = CostAdvice::analyze(&drawing, &estimate, &alternatives);
        assert!(advice.cheapest_alternative.is_none());
        assert_eq!(advice.potential_savings_pct, 0.0);
        assert!(advice.suggestions.is_empty());
    }
}
