//! Measure type - a value tagged with a unit of a fixed category

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;
use measura_core::{format_number, RoundingMode, UnitCategory, UnitDefinition, UnitError, UnitRegistry};
use crate::defaults::default_registry;
use crate::parse::split_measure;
use crate::Dimension;

/// A typed value: canonical magnitude in the category's base unit,
/// the unit used for display, and a display precision policy.
///
/// Every transform returns a new `Measure`; the receiver is never
/// mutated. Arithmetic works on canonical magnitudes, so values shown in
/// different units of the same category combine without explicit
/// conversion. For temperatures this means sums are taken on the kelvin
/// scale.
///
/// The canonical magnitude is always finite. Constructors and arithmetic
/// report `InvalidArgument` instead of producing NaN or infinity, which is
/// why the operator impls yield `Result`.
#[derive(Debug, Clone)]
pub struct Measure<D: Dimension> {
    canonical: f64,
    unit: Arc<UnitDefinition>,
    precision: Option<u32>,
    rounding: RoundingMode,
    _dim: PhantomData<D>,
}

impl<D: Dimension> Measure<D> {
    /// The category every unit of this measure must belong to
    pub fn category() -> UnitCategory {
        D::CATEGORY
    }

    /// Create from a value and unit symbol using the default registry
    pub fn of(value: f64, symbol: &str) -> Result<Self, UnitError> {
        Self::of_in(&default_registry(), value, symbol)
    }

    /// Create from a value and unit symbol resolved in `registry`
    pub fn of_in(registry: &UnitRegistry, value: f64, symbol: &str) -> Result<Self, UnitError> {
        let unit = registry.resolve(symbol)?;
        Self::from_definition(value, unit)
    }

    /// Parse text like "5 m" or "1.5e3kg" using the default registry
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        Self::parse_in(&default_registry(), text)
    }

    pub fn parse_in(registry: &UnitRegistry, text: &str) -> Result<Self, UnitError> {
        let (value, symbol) = split_measure(text)?;
        Self::of_in(registry, value, symbol)
    }

    /// Create from a value expressed in an already resolved unit
    pub fn from_definition(value: f64, unit: Arc<UnitDefinition>) -> Result<Self, UnitError> {
        check_category::<D>(&unit)?;
        if !value.is_finite() {
            return Err(UnitError::invalid_argument(format!("value must be finite, got {}", value)));
        }
        let canonical = unit.to_base(value);
        if !canonical.is_finite() {
            return Err(UnitError::invalid_argument(format!(
                "{} {} is out of range",
                value,
                unit.symbol()
            )));
        }
        Ok(Self::from_parts(canonical, unit))
    }

    pub(crate) fn with_unit(value: f64, unit: UnitDefinition) -> Result<Self, UnitError> {
        Self::from_definition(value, Arc::new(unit))
    }

    fn from_parts(canonical: f64, unit: Arc<UnitDefinition>) -> Self {
        Measure {
            // normalizes -0.0
            canonical: canonical + 0.0,
            unit,
            precision: None,
            rounding: RoundingMode::default(),
            _dim: PhantomData,
        }
    }

    fn derive(&self, canonical: f64) -> Result<Self, UnitError> {
        if !canonical.is_finite() {
            return Err(UnitError::invalid_argument(format!(
                "result out of range: {} {}",
                canonical,
                self.unit.symbol()
            )));
        }
        Ok(Measure {
            canonical: canonical + 0.0,
            unit: Arc::clone(&self.unit),
            precision: self.precision,
            rounding: self.rounding,
            _dim: PhantomData,
        })
    }

    // ========== Conversion ==========

    /// Same magnitude, displayed in another unit (default registry)
    pub fn to(&self, symbol: &str) -> Result<Self, UnitError> {
        self.to_in(&default_registry(), symbol)
    }

    pub fn to_in(&self, registry: &UnitRegistry, symbol: &str) -> Result<Self, UnitError> {
        let unit = registry.resolve(symbol)?;
        self.to_unit(unit)
    }

    pub fn to_unit(&self, unit: Arc<UnitDefinition>) -> Result<Self, UnitError> {
        check_category::<D>(&unit)?;
        Ok(Measure {
            canonical: self.canonical,
            unit,
            precision: self.precision,
            rounding: self.rounding,
            _dim: PhantomData,
        })
    }

    /// Display in the category's base unit
    pub fn to_base_in(&self, registry: &UnitRegistry) -> Result<Self, UnitError> {
        let base = registry.base_unit(D::CATEGORY).ok_or_else(|| {
            UnitError::unknown_unit(format!("base unit for {}", D::CATEGORY))
        })?;
        self.to_unit(base)
    }

    // ========== Accessors ==========

    /// Magnitude expressed in the display unit
    pub fn value(&self) -> f64 {
        self.unit.from_base(self.canonical)
    }

    /// Magnitude expressed in the category's base unit
    pub fn canonical(&self) -> f64 {
        self.canonical
    }

    /// Display value after applying precision and rounding
    pub fn rounded_value(&self) -> f64 {
        match self.precision {
            Some(digits) => self.rounding.round(self.value(), digits),
            None => self.value(),
        }
    }

    pub fn symbol(&self) -> &str {
        self.unit.symbol()
    }

    pub fn display_name(&self) -> &str {
        self.unit.display_name()
    }

    pub fn unit(&self) -> &Arc<UnitDefinition> {
        &self.unit
    }

    /// Fixed decimal digits for display, `None` for full precision
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    // ========== Precision ==========

    pub fn with_precision(&self, digits: u32) -> Self {
        let mut next = self.clone();
        next.precision = Some(digits);
        next
    }

    pub fn with_full_precision(&self) -> Self {
        let mut next = self.clone();
        next.precision = None;
        next
    }

    pub fn with_rounding(&self, rounding: RoundingMode) -> Self {
        let mut next = self.clone();
        next.rounding = rounding;
        next
    }

    // ========== Arithmetic ==========

    /// Sum, displayed in this measure's unit
    pub fn plus(&self, other: &Self) -> Result<Self, UnitError> {
        self.derive(self.canonical + other.canonical)
    }

    /// Difference, displayed in this measure's unit
    pub fn minus(&self, other: &Self) -> Result<Self, UnitError> {
        self.derive(self.canonical - other.canonical)
    }

    pub fn times(&self, factor: f64) -> Result<Self, UnitError> {
        if !factor.is_finite() {
            return Err(UnitError::invalid_argument(format!("cannot multiply by {}", factor)));
        }
        self.derive(self.canonical * factor)
    }

    pub fn divided_by(&self, divisor: f64) -> Result<Self, UnitError> {
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(UnitError::invalid_argument(format!("cannot divide by {}", divisor)));
        }
        self.derive(self.canonical / divisor)
    }

    /// Ratio of two measures of the same category (dimensionless)
    pub fn ratio(&self, other: &Self) -> Result<f64, UnitError> {
        if other.canonical == 0.0 {
            return Err(UnitError::invalid_argument("cannot divide by a zero measure"));
        }
        let ratio = self.canonical / other.canonical;
        if !ratio.is_finite() {
            return Err(UnitError::invalid_argument(format!("ratio out of range: {}", ratio)));
        }
        Ok(ratio)
    }

    // ========== Formatting ==========

    /// Render as "<numeral> <symbol>"
    pub fn format(&self) -> String {
        format!(
            "{} {}",
            format_number(self.value(), self.precision, self.rounding),
            self.unit.symbol()
        )
    }
}

fn check_category<D: Dimension>(unit: &UnitDefinition) -> Result<(), UnitError> {
    if unit.category() != D::CATEGORY {
        return Err(UnitError::category_mismatch(unit.symbol(), D::CATEGORY, unit.category()));
    }
    Ok(())
}

impl<D: Dimension> fmt::Display for Measure<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl<D: Dimension> PartialEq for Measure<D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D: Dimension> Eq for Measure<D> {}

impl<D: Dimension> PartialOrd for Measure<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Dimension> Ord for Measure<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.total_cmp(&other.canonical)
    }
}

impl<D: Dimension> Add for Measure<D> {
    type Output = Result<Measure<D>, UnitError>;

    fn add(self, rhs: Self) -> Self::Output {
        self.plus(&rhs)
    }
}

impl<'a, D: Dimension> Add<&'a Measure<D>> for &'a Measure<D> {
    type Output = Result<Measure<D>, UnitError>;

    fn add(self, rhs: &'a Measure<D>) -> Self::Output {
        self.plus(rhs)
    }
}

impl<D: Dimension> Sub for Measure<D> {
    type Output = Result<Measure<D>, UnitError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(&rhs)
    }
}

impl<'a, D: Dimension> Sub<&'a Measure<D>> for &'a Measure<D> {
    type Output = Result<Measure<D>, UnitError>;

    fn sub(self, rhs: &'a Measure<D>) -> Self::Output {
        self.minus(rhs)
    }
}

impl<D: Dimension> Mul<f64> for Measure<D> {
    type Output = Result<Measure<D>, UnitError>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.times(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Length, Temperature, Weight};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_parse_and_convert() {
        let cm = Length::parse("1m").unwrap().to("cm").unwrap();
        assert!(close(cm.value(), 100.0));
        assert_eq!(cm.symbol(), "cm");
        assert_eq!(cm.display_name(), "centimeter");

        let inches = Length::parse("1ft").unwrap().to("in").unwrap();
        assert!(close(inches.value(), 12.0));
    }

    #[test]
    fn test_addition_uses_canonical() {
        let sum = (Length::parse("5m").unwrap() + Length::parse("3m").unwrap()).unwrap();
        assert_eq!(sum.canonical(), 8.0);

        let mixed = Length::parse("1 km").unwrap().plus(&Length::parse("500 m").unwrap()).unwrap();
        assert_eq!(mixed.symbol(), "km");
        assert!(close(mixed.value(), 1.5));
    }

    #[test]
    fn test_subtraction_keeps_left_unit() {
        let diff = (Length::parse("1 m").unwrap() - Length::parse("20 cm").unwrap()).unwrap();
        assert_eq!(diff.symbol(), "m");
        assert!(close(diff.value(), 0.8));
    }

    #[test]
    fn test_round_trip_every_unit() {
        let registry = default_registry();
        for def in registry.get_units_by_category(UnitCategory::Length) {
            for v in [0.0, 1.0, -2.5, 1234.5678] {
                let m = Length::of(v, def.symbol()).unwrap();
                let back = m.to(def.symbol()).unwrap();
                assert!(close(back.value(), v), "{} {}", v, def.symbol());
            }
        }
        for def in registry.get_units_by_category(UnitCategory::Temperature) {
            let t = Temperature::of(-40.0, def.symbol()).unwrap();
            assert!(close(t.to(def.symbol()).unwrap().value(), -40.0));
        }
    }

    #[test]
    fn test_transitivity() {
        for v in [0.0, 1.0, 3.75, -12.0, 1e6] {
            let original = Length::of(v, "m").unwrap();
            let chained = original.to("cm").unwrap().to("mm").unwrap();
            assert_eq!(chained.canonical(), original.canonical());
            assert_eq!(chained, original);
        }
    }

    #[test]
    fn test_category_mismatch() {
        let err = Length::parse("5kg").unwrap_err();
        assert!(matches!(
            err,
            UnitError::CategoryMismatch { expected: UnitCategory::Length, found: UnitCategory::Weight, .. }
        ));

        let err = Length::parse("5 m").unwrap().to("kg").unwrap_err();
        assert!(matches!(err, UnitError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_unknown_and_invalid() {
        assert!(matches!(Length::parse("5xyz"), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(Length::parse("invalid"), Err(UnitError::InvalidFormat(_))));
        assert!(matches!(Length::of(f64::NAN, "m"), Err(UnitError::InvalidArgument(_))));
    }

    #[test]
    fn test_explicit_registry() {
        let mut builder = UnitRegistry::builder();
        builder.register(UnitDefinition::new("league", "league", UnitCategory::Length, 4828.032));
        let registry = builder.build();

        let l = Length::of_in(&registry, 1.0, "league").unwrap();
        assert!(close(l.canonical(), 4828.032));
        assert!(matches!(Length::of_in(&registry, 1.0, "m"), Err(UnitError::UnknownUnit(_))));
        assert!(Length::of(1.0, "league").is_err());
    }

    #[test]
    fn test_precision_is_display_only() {
        let m = Length::of(1.23456, "m").unwrap();
        let p2 = m.with_precision(2);
        assert_eq!(p2.format(), "1.23 m");
        assert_eq!(p2.canonical(), m.canonical());
        assert_eq!(p2.rounded_value(), 1.23);

        let back = p2.with_precision(4).with_full_precision();
        assert_eq!(back.value(), 1.23456);
        assert_eq!(back.format(), "1.23456 m");
    }

    #[test]
    fn test_rounding_mode() {
        let m = Length::of(2.5, "m").unwrap().with_precision(0);
        assert_eq!(m.format(), "3 m");
        assert_eq!(m.with_rounding(RoundingMode::HalfEven).format(), "2 m");
        assert_eq!(m.with_rounding(RoundingMode::Down).rounded_value(), 2.0);
    }

    #[test]
    fn test_policy_carries_through_derivations() {
        let km = Length::of(1.0, "km")
            .unwrap()
            .with_precision(3)
            .with_rounding(RoundingMode::Floor);
        let derived = km
            .to("m")
            .unwrap()
            .times(1.5)
            .unwrap()
            .plus(&Length::of(250.0, "m").unwrap())
            .unwrap();
        assert_eq!(derived.precision(), Some(3));
        assert_eq!(derived.rounding(), RoundingMode::Floor);
        assert_eq!(derived.format(), "1750.000 m");
    }

    #[test]
    fn test_scalar_arithmetic() {
        let w = Weight::of(2.0, "kg").unwrap();
        assert_eq!((w.clone() * 3.0).unwrap().canonical(), 6.0);
        assert_eq!((&w + &w).unwrap().canonical(), 4.0);
        assert_eq!(w.divided_by(4.0).unwrap().canonical(), 0.5);
        assert!(matches!(w.divided_by(0.0), Err(UnitError::InvalidArgument(_))));
        assert!(close(w.ratio(&Weight::of(500.0, "g").unwrap()).unwrap(), 4.0));
    }

    #[test]
    fn test_arithmetic_rejects_non_finite() {
        let m = Length::of(1.0, "m").unwrap();
        assert!(matches!(m.clone() * f64::INFINITY, Err(UnitError::InvalidArgument(_))));
        assert!(matches!(m.times(f64::NAN), Err(UnitError::InvalidArgument(_))));
        assert!(matches!(m.divided_by(1e-320), Err(UnitError::InvalidArgument(_))));
        assert!(matches!(m.divided_by(f64::INFINITY), Err(UnitError::InvalidArgument(_))));

        let huge = Length::of(f64::MAX, "m").unwrap();
        assert!(matches!(&huge + &huge, Err(UnitError::InvalidArgument(_))));
        assert!(matches!(huge.times(2.0), Err(UnitError::InvalidArgument(_))));
        assert!(m.ratio(&Length::of(1e-320, "m").unwrap()).is_err());
    }

    #[test]
    fn test_ordering_ignores_display_unit() {
        let a = Length::of(1.0, "km").unwrap();
        let b = Length::of(999.0, "m").unwrap();
        let c = Length::of(1000.0, "m").unwrap();
        assert!(a > b);
        assert_eq!(a, c);
        let mut values = vec![a.clone(), b.clone()];
        values.sort();
        assert_eq!(values[0].symbol(), "m");
        assert_eq!(values.iter().max().unwrap().symbol(), "km");
    }

    #[test]
    fn test_temperature() {
        let boiling = Temperature::of(100.0, "degC").unwrap();
        assert!(close(boiling.canonical(), 373.15));
        assert!(close(boiling.to("degF").unwrap().value(), 212.0));
        assert!(close(Temperature::parse("-40 F").unwrap().to("C").unwrap().value(), -40.0));
        assert!(close(Temperature::parse("0 K").unwrap().to("degC").unwrap().value(), -273.15));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Length::of(5.0, "m").unwrap()), "5 m");
        assert_eq!(format!("{}", Length::of(0.5, "km").unwrap()), "0.5 km");
    }

    #[test]
    fn test_to_base() {
        let ft = Length::of(10.0, "ft").unwrap();
        let base = ft.to_base_in(&default_registry()).unwrap();
        assert_eq!(base.symbol(), "m");
        assert!(close(base.value(), 3.048));
    }
}
