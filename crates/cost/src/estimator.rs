//! Machining time and cost estimation.
//!
//! ```text
//! machining_time = (length / feed_rate + setup_time + tool_change_time) * safety_factor
//! material_cost  = length * (thickness + kerf_width) / 1000 * cost_per_cm3
//! labor_cost     = machining_time / 60 * hourly_rate
//! total          = (material_cost + labor_cost + setup_cost) * (1 + tax_rate)
//! ```

use cutquote_core::{Drawing, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::CostConfig;
use crate::material::Material;

/// A cost and time estimate for one drawing, material and thickness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostEstimate {
    /// Stock material.
    pub material: Material,
    /// Stock thickness in mm.
    pub thickness: f64,
    /// Total cutting length in mm.
    pub cutting_length: f64,
    /// Machining time in minutes.
    pub machining_time: f64,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub setup_cost: f64,
    pub tax_amount: f64,
    /// Grand total including tax.
    pub total: f64,
}

impl CostEstimate {
    /// Material, labor and setup before tax.
    pub fn subtotal(&self) -> f64 {
        self.material_cost + self.labor_cost + self.setup_cost
    }

    /// Machining time in hours.
    pub fn machining_hours(&self) -> f64 {
        self.machining_time / 60.0
    }
}

/// Estimates cost and time from aggregate cutting length.
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    config: CostConfig,
}

impl CostEstimator {
    /// Creates an estimator with the given shop constants.
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    /// Shop constants in use.
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Estimates a drawing. `material` is parsed case-insensitively.
    pub fn estimate(&self, drawing: &Drawing, material: &str, thickness: f64) -> Result<CostEstimate> {
        let material: Material = material.parse()?;
        self.estimate_length(drawing.total_length(), material, thickness)
    }

    /// Estimates a raw cutting length.
    pub fn estimate_length(&self, cutting_length: f64, material: Material, thickness: f64) -> Result<CostEstimate> {
        validate_inputs(cutting_length, thickness)?;
        self.config.validate()?;

        let props = self.config.properties(material);
        props.validate()?;

        let machining_time = self.machining_time_unchecked(cutting_length, props.feed_rate);
        let material_cost = cutting_length * (thickness + self.config.kerf_width) / 1000.0 * props.cost_per_cm3;
        let labor_cost = machining_time / 60.0 * props.hourly_rate;
        let setup_cost = self.config.setup_cost;
        let subtotal = material_cost + labor_cost + setup_cost;
        let tax_amount = subtotal * self.config.tax_rate;

        log::debug!(
            "estimate {} {:.2} mm @ {} mm: {:.2} min, total {:.2}",
            material,
            cutting_length,
            thickness,
            machining_time,
            subtotal + tax_amount
        );

        Ok(CostEstimate {
            material,
            thickness,
            cutting_length,
            machining_time,
            material_cost,
            labor_cost,
            setup_cost,
            tax_amount,
            total: subtotal + tax_amount,
        })
    }

    /// Machining time in minutes for a cutting length.
    pub fn machining_time(&self, cutting_length: f64, material: Material) -> Result<f64> {
        if !(cutting_length.is_finite() && cutting_length >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "cutting length must be a non-negative number, got {}",
                cutting_length
            )));
        }
        let props = self.config.properties(material);
        props.validate()?;
        Ok(self.machining_time_unchecked(cutting_length, props.feed_rate))
    }

    fn machining_time_unchecked(&self, cutting_length: f64, feed_rate: f64) -> f64 {
        (cutting_length / feed_rate + self.config.setup_time + self.config.tool_change_time)
            * self.config.safety_factor
    }
}

fn validate_inputs(cutting_length: f64, thickness: f64) -> Result<()> {
    if !(thickness.is_finite() && thickness > 0.0) {
        return Err(Error::InvalidThickness(thickness));
    }
    if !(cutting_length.is_finite() && cutting_length >= 0.0) {
        return Err(Error::InvalidInput(format!(
            "cutting length must be a non-negative number, got {}",
            cutting_length
        )));
    }
    Ok(())
}
