//! Unit categories
//!
//! A category is a dimensional domain. Conversions are only meaningful
//! between units of the same category.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::UnitError;

/// Closed set of dimensional categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Volume,
    Temperature,
    Area,
    Quantity,
    Time,
}

impl UnitCategory {
    /// All categories, in declaration order
    pub const ALL: [UnitCategory; 7] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Temperature,
        UnitCategory::Area,
        UnitCategory::Quantity,
        UnitCategory::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Area => "area",
            UnitCategory::Quantity => "quantity",
            UnitCategory::Time => "time",
        }
    }

    /// Whether units of this category convert through an offset
    /// (affine) rather than a pure ratio.
    pub fn is_affine(&self) -> bool {
        matches!(self, UnitCategory::Temperature)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitCategory {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        UnitCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| UnitError::invalid_argument(format!("unknown category: {}", s)))
    }
}
