//! Stock sheet types.

use cutquote_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost per mm² of the standard sheet catalog.
pub const STANDARD_COST_PER_MM2: f64 = 0.0001;

/// A rectangular stock sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    /// Display name, e.g. "1000x2000mm".
    pub name: String,

    /// Width in mm.
    pub width: f64,

    /// Height in mm.
    pub height: f64,

    /// Stock cost per mm².
    pub cost_per_mm2: f64,
}

impl Sheet {
    /// Creates a named sheet.
    pub fn new(name: impl Into<String>, width: f64, height: f64, cost_per_mm2: f64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cost_per_mm2,
        }
    }

    /// Creates a rectangular sheet named after its dimensions, at the standard rate.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(
            format!("{}x{}mm", width, height),
            width,
            height,
            STANDARD_COST_PER_MM2,
        )
    }

    /// Sets the cost per mm².
    pub fn with_cost_per_mm2(mut self, cost: f64) -> Self {
        self.cost_per_mm2 = cost;
        self
    }

    /// Sheet area in mm².
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Price of the whole sheet.
    pub fn cost(&self) -> f64 {
        self.area() * self.cost_per_mm2
    }

    /// Checks the sheet has positive finite dimensions and a non-negative cost.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidInput(format!(
                "sheet '{}' has invalid dimensions {} x {}",
                self.name, self.width, self.height
            )));
        }
        if !(self.cost_per_mm2.is_finite() && self.cost_per_mm2 >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "sheet '{}' has invalid cost {}",
                self.name, self.cost_per_mm2
            )));
        }
        Ok(())
    }
}

/// The standard sheet catalog: 1000x2000, 1250x2500, 1500x3000 and 2000x4000 mm.
pub fn standard_sheets() -> Vec<Sheet> {
    vec![
        Sheet::rectangle(1000.0, 2000.0),
        Sheet::rectangle(1250.0, 2500.0),
        Sheet::rectangle(1500.0, 3000.0),
        Sheet::rectangle(2000.0, 4000.0),
    ]
}
