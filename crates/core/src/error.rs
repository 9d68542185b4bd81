//! Error types shared by every CutQuote crate.

use thiserror::Error;

/// Errors returned by CutQuote operations.
///
/// Entity-level problems never surface here: a malformed record is skipped and
/// recorded on the [`Drawing`](crate::Drawing) instead. Only call-level invalid
/// input (estimator, nester) is returned as an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The material id is not one of the supported materials.
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    /// The stock thickness is zero, negative or not finite.
    #[error("thickness must be a positive number of millimetres, got {0}")]
    InvalidThickness(f64),

    /// Any other invalid call argument (negative length, bad sheet size, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single raw record could not be turned into an entity.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Geometry that cannot be processed.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// I/O failure while reading drawing data.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true for the invalid-input family (bad material, thickness or argument).
    ///
    /// These are hard failures of the specific call and should be reported to the
    /// user as such, unlike partial results carrying warnings.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownMaterial(_) | Self::InvalidThickness(_) | Self::InvalidInput(_)
        )
    }

    /// Short machine-readable kind, used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMaterial(_) => "unknown_material",
            Self::InvalidThickness(_) => "invalid_thickness",
            Self::InvalidInput(_) => "invalid_input",
            Self::ParseError(_) => "parse_error",
            Self::InvalidGeometry(_) => "invalid_geometry",
            Self::IoError(_) => "io_error",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result alias using the CutQuote [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_family() {
        assert!(Error::UnknownMaterial("unobtainium".into()).is_invalid_input());
        assert!(Error::InvalidThickness(0.0).is_invalid_input());
        assert!(Error::InvalidInput("spacing".into()).is_invalid_input());
        assert!(!Error::ParseError("bad".into()).is_invalid_input());
    }

    #[test]
    fn test_display() {
        let err = Error::UnknownMaterial("gold".into());
        assert_eq!(err.to_string(), "unknown material 'gold'");
        assert_eq!(err.kind(), "unknown_material");
    }
}
