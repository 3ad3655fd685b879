//! Untyped conversion between unit symbols, with an optional cache

use std::sync::Arc;
use measura_core::{RoundingMode, ThreadSafeRegistry, UnitError, UnitRegistry};
use crate::cache::{CacheKey, ConversionCache};
use crate::parse::{parse_conversion, split_measure};

/// Convert `value` from one unit symbol to another within `registry`.
///
/// Handles affine (temperature) units; fails on unknown symbols and
/// cross-category requests.
pub fn convert_value(registry: &UnitRegistry, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
    if !value.is_finite() {
        return Err(UnitError::invalid_argument(format!("value must be finite, got {}", value)));
    }
    let from_def = registry.resolve(from)?;
    let to_def = registry.resolve(to)?;
    if from_def.category() != to_def.category() {
        return Err(UnitError::category_mismatch(to_def.symbol(), from_def.category(), to_def.category()));
    }
    if let Some(ratio) = registry.get_conversion_ratio(from, to) {
        return Ok(value * ratio);
    }
    Ok(to_def.from_base(from_def.to_base(value)))
}

/// Conversion front end over a shared registry.
///
/// With a cache attached, repeated (value, from, to, precision) requests
/// skip symbol resolution entirely. Keys carry the rounding mode and the
/// registry snapshot generation, so a cache may be shared between
/// converters and never serves results from a superseded registry.
/// Failed conversions are never cached.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Arc<ThreadSafeRegistry>,
    cache: Option<Arc<ConversionCache>>,
    rounding: RoundingMode,
}

impl Converter {
    pub fn new(registry: Arc<ThreadSafeRegistry>) -> Self {
        Self {
            registry,
            cache: None,
            rounding: RoundingMode::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ConversionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Rounding applied by [`convert_with_precision`](Self::convert_with_precision)
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn registry(&self) -> &Arc<ThreadSafeRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> Option<&Arc<ConversionCache>> {
        self.cache.as_ref()
    }

    /// Full-precision conversion
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        self.convert_with_precision(value, from, to, None)
    }

    /// Conversion rounded to `precision` decimal digits (`None` = full precision)
    pub fn convert_with_precision(
        &self,
        value: f64,
        from: &str,
        to: &str,
        precision: Option<u32>,
    ) -> Result<f64, UnitError> {
        let snapshot = self.registry.snapshot();
        let compute = || -> Result<f64, UnitError> {
            let result = convert_value(&snapshot, value, from, to)?;
            Ok(match precision {
                Some(digits) => self.rounding.round(result, digits),
                None => result,
            })
        };

        match &self.cache {
            Some(cache) => {
                let key = CacheKey::new(value, from, to, precision)
                    .with_rounding(self.rounding)
                    .with_generation(snapshot.generation());
                cache.get_or_compute(key, compute)
            }
            None => compute(),
        }
    }

    /// Convert a text request such as "5 km -> mi" or "100 degC to degF"
    pub fn convert_text(&self, text: &str) -> Result<f64, UnitError> {
        let (source, target) = parse_conversion(text)?;
        let (value, from) = split_measure(source)?;
        self.convert(value, from, target)
    }

    /// Value expressed in the category's base unit
    pub fn to_base(&self, value: f64, unit: &str) -> Result<f64, UnitError> {
        let def = self.registry.resolve(unit)?;
        Ok(def.to_base(value))
    }
}
