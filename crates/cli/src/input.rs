//! Drawing and shop profile loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cutquote_core::Drawing;
use cutquote_ffi::QuoteConfig;

/// Loads a drawing from a JSON file of entity records.
pub fn load_drawing(path: &Path) -> Result<Drawing> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read drawing {}", path.display()))?;
    let drawing = Drawing::from_json_str(&content)
        .with_context(|| format!("failed to parse drawing {}", path.display()))?;
    log::info!(
        "loaded {} entities from {} ({} skipped)",
        drawing.len(),
        path.display(),
        drawing.skipped().len()
    );
    Ok(drawing)
}

/// Loads a TOML shop profile; `None` gives the defaults.
pub fn load_profile(path: Option<&Path>) -> Result<QuoteConfig> {
    let Some(path) = path else {
        return Ok(QuoteConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let config = parse_profile(&content)
        .with_context(|| format!("invalid profile {}", path.display()))?;
    log::info!("using shop profile {}", path.display());
    Ok(config)
}

/// Parses and validates a TOML shop profile.
pub fn parse_profile(content: &str) -> Result<QuoteConfig> {
    let config: QuoteConfig = toml::from_str(content)?;
    config.cost.validate()?;
    for sheet in &config.nesting.sheets {
        sheet.validate()?;
    }
    Ok(config)
}
