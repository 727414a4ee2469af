//! Error type shared by every filter and by the pipeline.
//!
//! Numeric edge cases (negative stroke size, zero sigma, contrast amounts
//! far outside the usual range) are clamped by the operators themselves.
//! Only structural problems end up here.

use thiserror::Error;

/// Errors reported by filters, the pipeline and the binding layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Buffer shape does not match `width * height * 4`, the image is not
    /// RGBA, or two images that must share dimensions don't.
    #[error("invalid dimensions: expected {expected}, got {actual}")]
    InvalidDimensions { expected: String, actual: String },

    /// Color string is not a 6-digit hex RGB value.
    #[error("invalid color {0:?}: expected 6 hex digits such as \"#FF8800\"")]
    InvalidColor(String),

    /// Parameter value has no defined result (e.g. contrast amount 259).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    pub(crate) fn dimensions(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        FilterError::InvalidDimensions {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
