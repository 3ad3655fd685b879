//! Errors raised by unit resolution, parsing and measure arithmetic
//!
//! Every public entry point reports one of four kinds. None of them are
//! transient, so callers never retry.

use crate::UnitCategory;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const CATEGORY_MISMATCH: &str = "CATEGORY_MISMATCH";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
}

/// Error type for unit operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Category mismatch for '{symbol}': expected {expected}, found {found}")]
    CategoryMismatch {
        symbol: String,
        expected: UnitCategory,
        found: UnitCategory,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl UnitError {
    pub fn unknown_unit(symbol: impl Into<String>) -> Self {
        Self::UnknownUnit(symbol.into())
    }

    pub fn category_mismatch(symbol: impl Into<String>, expected: UnitCategory, found: UnitCategory) -> Self {
        Self::CategoryMismatch {
            symbol: symbol.into(),
            expected,
            found,
        }
    }

    pub fn invalid_format(details: impl Into<String>) -> Self {
        Self::InvalidFormat(details.into())
    }

    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument(details.into())
    }

    /// Machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::CategoryMismatch { .. } => codes::CATEGORY_MISMATCH,
            Self::InvalidFormat(_) => codes::INVALID_FORMAT,
            Self::InvalidArgument(_) => codes::INVALID_ARGUMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(UnitError::unknown_unit("xyz").code(), codes::UNKNOWN_UNIT);
        assert_eq!(UnitError::invalid_format("x").code(), codes::INVALID_FORMAT);
        assert_eq!(UnitError::invalid_argument("x").code(), codes::INVALID_ARGUMENT);
        let err = UnitError::category_mismatch("kg", UnitCategory::Length, UnitCategory::Weight);
        assert_eq!(err.code(), codes::CATEGORY_MISMATCH);
    }

    #[test]
    fn test_display() {
        let err = UnitError::category_mismatch("kg", UnitCategory::Length, UnitCategory::Weight);
        assert_eq!(err.to_string(), "Category mismatch for 'kg': expected length, found weight");
        assert_eq!(UnitError::unknown_unit("xyz").to_string(), "Unknown unit: xyz");
    }
}
