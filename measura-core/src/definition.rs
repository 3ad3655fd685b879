//! Unit definitions and their conversion strategies

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::{UnitCategory, UnitError};

/// How a unit maps onto its category's base unit.
///
/// `base = value * ratio` for multiplicative units,
/// `base = value * scale + offset` for affine ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Conversion {
    Multiplicative { ratio: f64 },
    Affine { scale: f64, offset: f64 },
}

impl Conversion {
    /// Convert a value in this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Conversion::Multiplicative { ratio } => value * ratio,
            Conversion::Affine { scale, offset } => value * scale + offset,
        }
    }

    /// Convert a base-unit value to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            Conversion::Multiplicative { ratio } => base / ratio,
            Conversion::Affine { scale, offset } => (base - offset) / scale,
        }
    }

    /// The multiplicative part of the transform
    pub fn scale(&self) -> f64 {
        match *self {
            Conversion::Multiplicative { ratio } => ratio,
            Conversion::Affine { scale, .. } => scale,
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Conversion::Affine { .. })
    }
}

/// Immutable description of one unit symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    symbol: String,
    display_name: String,
    category: UnitCategory,
    conversion: Conversion,
    is_base_unit: bool,
    aliases: Vec<String>,
}

impl UnitDefinition {
    /// Create a multiplicative unit
    pub fn new(symbol: &str, display_name: &str, category: UnitCategory, base_ratio: f64) -> Self {
        UnitDefinition {
            symbol: symbol.to_string(),
            display_name: display_name.to_string(),
            category,
            conversion: Conversion::Multiplicative { ratio: base_ratio },
            is_base_unit: false,
            aliases: Vec::new(),
        }
    }

    /// Create an affine unit (temperature scales)
    pub fn affine(symbol: &str, display_name: &str, category: UnitCategory, scale: f64, offset: f64) -> Self {
        UnitDefinition {
            symbol: symbol.to_string(),
            display_name: display_name.to_string(),
            category,
            conversion: Conversion::Affine { scale, offset },
            is_base_unit: false,
            aliases: Vec::new(),
        }
    }

    /// Mark this definition as its category's base unit
    pub fn base(mut self) -> Self {
        self.is_base_unit = true;
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn category(&self) -> UnitCategory {
        self.category
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Factor converting one of this unit into the base unit.
    /// For affine units this is the scale, without the offset.
    pub fn base_ratio(&self) -> f64 {
        self.conversion.scale()
    }

    pub fn is_base_unit(&self) -> bool {
        self.is_base_unit
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Canonical symbol followed by every alias
    pub fn all_symbols(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.symbol.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.conversion.to_base(value)
    }

    pub fn from_base(&self, base: f64) -> f64 {
        self.conversion.from_base(base)
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Declarative, validated construction of a [`UnitDefinition`]
///
/// ```
/// use measura_core::{CustomUnitBuilder, UnitCategory};
///
/// let furlong = CustomUnitBuilder::new()
///     .symbol("fur")
///     .display_name("furlong")
///     .category(UnitCategory::Length)
///     .base_ratio(201.168)
///     .alias("furlongs")
///     .build()
///     .unwrap();
/// assert_eq!(furlong.base_ratio(), 201.168);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CustomUnitBuilder {
    symbol: Option<String>,
    display_name: Option<String>,
    category: Option<UnitCategory>,
    base_ratio: Option<f64>,
    offset: Option<f64>,
    base_unit: bool,
    aliases: Vec<String>,
}

impl CustomUnitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    pub fn category(mut self, category: UnitCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn base_ratio(mut self, ratio: f64) -> Self {
        self.base_ratio = Some(ratio);
        self
    }

    /// Additive offset to the base unit; only valid for affine categories
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn base_unit(mut self, is_base: bool) -> Self {
        self.base_unit = is_base;
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    pub fn build(self) -> Result<UnitDefinition, UnitError> {
        let symbol = match self.symbol {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return Err(UnitError::invalid_argument("custom unit requires a non-empty symbol")),
        };
        let category = self.category.ok_or_else(|| {
            UnitError::invalid_argument(format!("custom unit '{}' requires a category", symbol))
        })?;
        let ratio = self.base_ratio.ok_or_else(|| {
            UnitError::invalid_argument(format!("custom unit '{}' requires a base ratio", symbol))
        })?;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(UnitError::invalid_argument(format!(
                "custom unit '{}': base ratio must be positive and finite, got {}",
                symbol, ratio
            )));
        }

        let conversion = match self.offset {
            Some(offset) if !category.is_affine() => {
                return Err(UnitError::invalid_argument(format!(
                    "custom unit '{}': offset {} not allowed for {} units",
                    symbol, offset, category
                )));
            }
            Some(offset) if !offset.is_finite() => {
                return Err(UnitError::invalid_argument(format!(
                    "custom unit '{}': offset must be finite",
                    symbol
                )));
            }
            Some(offset) => Conversion::Affine { scale: ratio, offset },
            None if category.is_affine() => Conversion::Affine { scale: ratio, offset: 0.0 },
            None => Conversion::Multiplicative { ratio },
        };

        let display_name = self.display_name.unwrap_or_else(|| symbol.clone());
        let aliases = self
            .aliases
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        Ok(UnitDefinition {
            symbol,
            display_name,
            category,
            conversion,
            is_base_unit: self.base_unit,
            aliases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kilometer() -> UnitDefinition {
        UnitDefinition::new("km", "kilometer", UnitCategory::Length, 1000.0)
    }

    fn celsius() -> UnitDefinition {
        UnitDefinition::affine("degC", "degree Celsius", UnitCategory::Temperature, 1.0, 273.15)
    }

    #[test]
    fn test_multiplicative_conversion() {
        let km = kilometer();
        assert_eq!(km.to_base(5.0), 5000.0);
        assert_eq!(km.from_base(5000.0), 5.0);
        assert_eq!(km.base_ratio(), 1000.0);
    }

    #[test]
    fn test_affine_conversion() {
        let c = celsius();
        assert!((c.to_base(100.0) - 373.15).abs() < 1e-9);
        assert!((c.from_base(273.15)).abs() < 1e-9);
        assert!(c.conversion().is_affine());
    }

    #[test]
    fn test_all_symbols() {
        let km = kilometer().with_aliases(&["kilometer", "kilometers"]);
        let symbols: Vec<&str> = km.all_symbols().collect();
        assert_eq!(symbols, vec!["km", "kilometer", "kilometers"]);
    }

    #[test]
    fn test_builder_multiplicative() {
        let def = CustomUnitBuilder::new()
            .symbol("fur")
            .display_name("furlong")
            .category(UnitCategory::Length)
            .base_ratio(201.168)
            .aliases(&["furlong", "furlongs"])
            .build()
            .unwrap();

        assert_eq!(def.symbol(), "fur");
        assert_eq!(def.display_name(), "furlong");
        assert!(!def.conversion().is_affine());
        assert_eq!(def.aliases().len(), 2);
    }

    #[test]
    fn test_builder_affine() {
        let def = CustomUnitBuilder::new()
            .symbol("degRe")
            .category(UnitCategory::Temperature)
            .base_ratio(1.25)
            .offset(273.15)
            .build()
            .unwrap();

        assert_eq!(def.display_name(), "degRe");
        assert!((def.to_base(80.0) - 373.15).abs() < 1e-9);
    }

    #[test]
    fn test_builder_rejects_offset_on_ratio_category() {
        let err = CustomUnitBuilder::new()
            .symbol("x")
            .category(UnitCategory::Length)
            .base_ratio(1.0)
            .offset(3.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, UnitError::InvalidArgument(_)));
    }

    #[test]
    fn test_builder_requires_fields() {
        assert!(CustomUnitBuilder::new().build().is_err());
        assert!(CustomUnitBuilder::new().symbol("x").build().is_err());
        assert!(CustomUnitBuilder::new()
            .symbol("x")
            .category(UnitCategory::Weight)
            .build()
            .is_err());
        assert!(CustomUnitBuilder::new()
            .symbol("x")
            .category(UnitCategory::Weight)
            .base_ratio(0.0)
            .build()
            .is_err());
    }
}
