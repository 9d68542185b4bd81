//! Configuration for grid nesting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sheet::{standard_sheets, Sheet};

/// Configuration parameters for grid nesting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NestingConfig {
    /// Spacing between parts and from the sheet edge, in mm.
    pub spacing: f64,

    /// Candidate stock sheets.
    pub sheets: Vec<Sheet>,

    /// Maximum placements generated for the layout of the best sheet.
    pub max_layout_parts: usize,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            sheets: standard_sheets(),
            max_layout_parts: 10_000,
        }
    }
}

impl NestingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the part spacing.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Replaces the sheet catalog.
    pub fn with_sheets(mut self, sheets: Vec<Sheet>) -> Self {
        self.sheets = sheets;
        self
    }

    /// Adds a sheet to the catalog.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Sets the layout size limit.
    pub fn with_max_layout_parts(mut self, limit: usize) -> Self {
        self.max_layout_parts = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NestingConfig::default();
        assert_eq!(config.spacing, 5.0);
        assert_eq!(config.sheets.len(), 4);
        assert_eq!(config.max_layout_parts, 10_000);
    }

    #[test]
    fn test_builder() {
        let config = NestingConfig::new()
            .with_spacing(2.0)
            .with_sheets(vec![Sheet::rectangle(500.0, 500.0)])
            .with_sheet(Sheet::rectangle(600.0, 600.0));
        assert_eq!(config.spacing, 2.0);
        assert_eq!(config.sheets.len(), 2);
        assert_eq!(config.sheets[1].name, "600x600mm");
    }
}
