//! Shop constants used by the cost estimator.

use std::collections::BTreeMap;

use cutquote_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::material::{Material, MaterialProperties};

/// Shop-level cost constants.
///
/// Per-material parameters default to [`Material::properties`] and can be
/// overridden individually, e.g. from a TOML shop profile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostConfig {
    /// Machine setup time in minutes.
    pub setup_time: f64,

    /// Tool change time in minutes.
    pub tool_change_time: f64,

    /// Multiplier applied to the raw machining time.
    pub safety_factor: f64,

    /// Kerf width in mm, added to the thickness when estimating removed volume.
    pub kerf_width: f64,

    /// Fixed setup and tooling charge.
    pub setup_cost: f64,

    /// Tax rate applied to the subtotal (0.18 = 18%).
    pub tax_rate: f64,

    /// Currency code used in reports.
    pub currency: String,

    /// Per-material parameter overrides.
    pub materials: BTreeMap<Material, MaterialProperties>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            setup_time: 15.0,
            tool_change_time: 5.0,
            safety_factor: 1.15,
            kerf_width: 0.2,
            setup_cost: 500.0,
            tax_rate: 0.18,
            currency: "INR".to_string(),
            materials: BTreeMap::new(),
        }
    }
}

impl CostConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the setup time (minutes).
    pub fn with_setup_time(mut self, minutes: f64) -> Self {
        self.setup_time = minutes;
        self
    }

    /// Sets the tool change time (minutes).
    pub fn with_tool_change_time(mut self, minutes: f64) -> Self {
        self.tool_change_time = minutes;
        self
    }

    /// Sets the safety factor.
    pub fn with_safety_factor(mut self, factor: f64) -> Self {
        self.safety_factor = factor;
        self
    }

    /// Sets the kerf width.
    pub fn with_kerf_width(mut self, width: f64) -> Self {
        self.kerf_width = width;
        self
    }

    /// Sets the fixed setup cost.
    pub fn with_setup_cost(mut self, cost: f64) -> Self {
        self.setup_cost = cost;
        self
    }

    /// Sets the tax rate.
    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Overrides the parameters of one material.
    pub fn with_material(mut self, material: Material, properties: MaterialProperties) -> Self {
        self.materials.insert(material, properties);
        self
    }

    /// Effective parameters for a material (override or built-in).
    pub fn properties(&self, material: Material) -> MaterialProperties {
        self.materials
            .get(&material)
            .copied()
            .unwrap_or_else(|| material.properties())
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("setup_time", self.setup_time),
            ("tool_change_time", self.tool_change_time),
            ("kerf_width", self.kerf_width),
            ("setup_cost", self.setup_cost),
            ("tax_rate", self.tax_rate),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidInput(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        if !(self.safety_factor.is_finite() && self.safety_factor > 0.0) {
            return Err(Error::InvalidInput(format!(
                "safety_factor must be positive, got {}",
                self.safety_factor
            )));
        }
        for (material, properties) in &self.materials {
            properties
                .validate()
                .map_err(|e| Error::InvalidInput(format!("{}: {}", material, e)))?;
        }
        Ok(())
    }
}
