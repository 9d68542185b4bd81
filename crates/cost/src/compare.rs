//! Material comparison: the same job priced in every supported material.

use cutquote_core::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::estimator::{CostEstimate, CostEstimator};
use crate::material::Material;

/// One material priced for the same cutting length and thickness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialAlternative {
    /// Full estimate in the alternative material.
    pub estimate: CostEstimate,
    /// Current total minus this total; positive means cheaper.
    pub savings: f64,
    /// Machining time change relative to the current material, in percent.
    pub time_change_pct: f64,
    /// True for the material the job is currently quoted in.
    pub is_current: bool,
}

impl CostEstimator {
    /// Prices every material for the same length and thickness, cheapest first.
    pub fn compare_materials(
        &self,
        cutting_length: f64,
        current: Material,
        thickness: f64,
    ) -> Result<Vec<MaterialAlternative>> {
        let baseline = self.estimate_length(cutting_length, current, thickness)?;

        let mut alternatives = Material::ALL
            .iter()
            .map(|&material| {
                let estimate = self.estimate_length(cutting_length, material, thickness)?;
                let time_change_pct = if baseline.machining_time > 0.0 {
                    (estimate.machining_time - baseline.machining_time) / baseline.machining_time * 100.0
                } else {
                    0.0
                };
                Ok(MaterialAlternative {
                    savings: baseline.total - estimate.total,
                    time_change_pct,
                    is_current: material == current,
                    estimate,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable sort keeps catalog order between equal totals.
        alternatives.sort_by(|a, b| a.estimate.total.total_cmp(&b.estimate.total));
        Ok(alternatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sorted_by_total() {
        let alternatives = CostEstimator::default()
            .compare_materials(2500.0, Material::Steel, 3.0)
            .unwrap();
        assert_eq!(alternatives.len(), Material::ALL.len());
        for pair in alternatives.windows(2) {
            assert!(pair[0].estimate.total <= pair[1].estimate.total);
        }
    }

    #[test]
    fn test_current_has_zero_savings() {
        let alternatives = CostEstimator::default()
            .compare_materials(2500.0, Material::Brass, 3.0)
            .unwrap();
        let current = alternatives.iter().find(|a| a.is_current).unwrap();
        assert_eq!(current.estimate.material, Material::Brass);
        assert_relative_eq!(current.savings, 0.0);
        assert_relative_eq!(current.time_change_pct, 0.0);

        // Wood has the fastest feed and lowest rate.
        let wood = alternatives.iter().find(|a| a.estimate.material == Material::Wood).unwrap();
        assert!(wood.savings > 0.0);
        assert!(wood.time_change_pct < 0.0);
    }
}
