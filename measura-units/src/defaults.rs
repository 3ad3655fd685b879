//! Default unit tables, organized by category
//!
//! Base units: meter, kilogram, liter, kelvin, square meter, piece, second.

use std::sync::{Arc, LazyLock};
use measura_core::{RegistryBuilder, UnitCategory, UnitDefinition, UnitRegistry};

/// Shared default registry, built on first use
static DEFAULT_REGISTRY: LazyLock<Arc<UnitRegistry>> = LazyLock::new(|| Arc::new(registry()));

/// The process-wide default table.
///
/// Convenience only: every operation also has a variant taking an
/// explicit registry.
pub fn default_registry() -> Arc<UnitRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// Build a fresh registry holding every default unit
pub fn registry() -> UnitRegistry {
    builder().build()
}

/// A builder pre-populated with the default units, ready for extension
pub fn builder() -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    register_all_units(&mut builder);
    builder
}

pub fn register_all_units(builder: &mut RegistryBuilder) {
    register_length_units(builder);
    register_weight_units(builder);
    register_volume_units(builder);
    register_temperature_units(builder);
    register_area_units(builder);
    register_quantity_units(builder);
    register_time_units(builder);
}

// ========== Named definitions ==========

pub fn meter() -> UnitDefinition {
    UnitDefinition::new("m", "meter", UnitCategory::Length, 1.0)
        .base()
        .with_aliases(&["meter", "meters", "metre", "metres"])
}

pub fn centimeter() -> UnitDefinition {
    UnitDefinition::new("cm", "centimeter", UnitCategory::Length, 0.01)
        .with_aliases(&["centimeter", "centimeters"])
}

pub fn millimeter() -> UnitDefinition {
    UnitDefinition::new("mm", "millimeter", UnitCategory::Length, 0.001)
        .with_aliases(&["millimeter", "millimeters"])
}

pub fn kilometer() -> UnitDefinition {
    UnitDefinition::new("km", "kilometer", UnitCategory::Length, 1000.0)
        .with_aliases(&["kilometer", "kilometers", "kilometre", "kilometres"])
}

pub fn inch() -> UnitDefinition {
    UnitDefinition::new("in", "inch", UnitCategory::Length, 0.0254).with_aliases(&["inch", "inches"])
}

pub fn foot() -> UnitDefinition {
    UnitDefinition::new("ft", "foot", UnitCategory::Length, 0.3048).with_aliases(&["foot", "feet"])
}

pub fn kilogram() -> UnitDefinition {
    UnitDefinition::new("kg", "kilogram", UnitCategory::Weight, 1.0)
        .base()
        .with_aliases(&["kilogram", "kilograms"])
}

pub fn gram() -> UnitDefinition {
    UnitDefinition::new("g", "gram", UnitCategory::Weight, 0.001).with_aliases(&["gram", "grams"])
}

pub fn pound() -> UnitDefinition {
    UnitDefinition::new("lb", "pound", UnitCategory::Weight, 0.45359237)
        .with_aliases(&["pound", "pounds", "lbs"])
}

pub fn liter() -> UnitDefinition {
    UnitDefinition::new("l", "liter", UnitCategory::Volume, 1.0)
        .base()
        .with_aliases(&["liter", "liters", "litre", "litres"])
}

pub fn milliliter() -> UnitDefinition {
    UnitDefinition::new("ml", "milliliter", UnitCategory::Volume, 0.001)
        .with_aliases(&["milliliter", "milliliters"])
}

pub fn kelvin() -> UnitDefinition {
    UnitDefinition::affine("K", "kelvin", UnitCategory::Temperature, 1.0, 0.0)
        .base()
        .with_aliases(&["kelvin"])
}

pub fn celsius() -> UnitDefinition {
    UnitDefinition::affine("degC", "degree Celsius", UnitCategory::Temperature, 1.0, 273.15)
        .with_aliases(&["C", "°C", "celsius"])
}

pub fn fahrenheit() -> UnitDefinition {
    // T(K) = (T(F) + 459.67) * 5/9
    UnitDefinition::affine(
        "degF",
        "degree Fahrenheit",
        UnitCategory::Temperature,
        5.0 / 9.0,
        459.67 * 5.0 / 9.0,
    )
    .with_aliases(&["F", "°F", "fahrenheit"])
}

pub fn square_meter() -> UnitDefinition {
    UnitDefinition::new("m2", "square meter", UnitCategory::Area, 1.0)
        .base()
        .with_aliases(&["m²", "sqm", "square meter", "square meters"])
}

pub fn piece() -> UnitDefinition {
    UnitDefinition::new("pcs", "pieces", UnitCategory::Quantity, 1.0)
        .base()
        .with_aliases(&["pc", "piece", "pieces", "ea", "each"])
}

pub fn dozen() -> UnitDefinition {
    UnitDefinition::new("doz", "dozen", UnitCategory::Quantity, 12.0).with_aliases(&["dozen", "dz"])
}

pub fn second() -> UnitDefinition {
    UnitDefinition::new("s", "second", UnitCategory::Time, 1.0)
        .base()
        .with_aliases(&["sec", "second", "seconds"])
}

pub fn minute() -> UnitDefinition {
    UnitDefinition::new("min", "minute", UnitCategory::Time, 60.0).with_aliases(&["minute", "minutes"])
}

pub fn hour() -> UnitDefinition {
    UnitDefinition::new("h", "hour", UnitCategory::Time, 3600.0).with_aliases(&["hr", "hour", "hours"])
}

// ========== Tables ==========

fn register_length_units(builder: &mut RegistryBuilder) {
    builder
        .register(meter())
        .register(kilometer())
        .register(centimeter())
        .register(millimeter())
        .register(UnitDefinition::new("dm", "decimeter", UnitCategory::Length, 0.1))
        .register(
            UnitDefinition::new("um", "micrometer", UnitCategory::Length, 0.000001)
                .with_aliases(&["μm", "micron", "microns"]),
        )
        .register(inch())
        .register(foot())
        .register(UnitDefinition::new("yd", "yard", UnitCategory::Length, 0.9144).with_aliases(&["yard", "yards"]))
        .register(UnitDefinition::new("mi", "mile", UnitCategory::Length, 1609.344).with_aliases(&["mile", "miles"]))
        .register(UnitDefinition::new("nmi", "nautical mile", UnitCategory::Length, 1852.0));
}

fn register_weight_units(builder: &mut RegistryBuilder) {
    builder
        .register(kilogram())
        .register(gram())
        .register(
            UnitDefinition::new("mg", "milligram", UnitCategory::Weight, 0.000001)
                .with_aliases(&["milligram", "milligrams"]),
        )
        .register(
            UnitDefinition::new("t", "tonne", UnitCategory::Weight, 1000.0)
                .with_aliases(&["tonne", "tonnes", "metric ton"]),
        )
        .register(pound())
        .register(
            UnitDefinition::new("oz", "ounce", UnitCategory::Weight, 0.028349523125)
                .with_aliases(&["ounce", "ounces"]),
        )
        .register(UnitDefinition::new("st", "stone", UnitCategory::Weight, 6.35029318))
        .register(UnitDefinition::new("ton", "short ton", UnitCategory::Weight, 907.18474))
        .register(UnitDefinition::new("ct", "carat", UnitCategory::Weight, 0.0002));
}

fn register_volume_units(builder: &mut RegistryBuilder) {
    builder
        .register(liter())
        .register(milliliter())
        .register(UnitDefinition::new("cl", "centiliter", UnitCategory::Volume, 0.01))
        .register(UnitDefinition::new("dl", "deciliter", UnitCategory::Volume, 0.1))
        .register(UnitDefinition::new("m3", "cubic meter", UnitCategory::Volume, 1000.0).with_alias("m³"))
        .register(UnitDefinition::new("cm3", "cubic centimeter", UnitCategory::Volume, 0.001).with_alias("cc"))
        .register(
            UnitDefinition::new("gal", "gallon", UnitCategory::Volume, 3.785411784)
                .with_aliases(&["gallon", "gallons"]),
        )
        .register(UnitDefinition::new("qt", "quart", UnitCategory::Volume, 0.946352946))
        .register(UnitDefinition::new("pt", "pint", UnitCategory::Volume, 0.473176473))
        .register(UnitDefinition::new("cup", "cup", UnitCategory::Volume, 0.2365882365).with_alias("cups"))
        .register(UnitDefinition::new("floz", "fluid ounce", UnitCategory::Volume, 0.0295735295625))
        .register(UnitDefinition::new("ft3", "cubic foot", UnitCategory::Volume, 28.316846592));
}

fn register_temperature_units(builder: &mut RegistryBuilder) {
    builder
        .register(kelvin())
        .register(celsius())
        .register(fahrenheit())
        .register(UnitDefinition::affine("R", "rankine", UnitCategory::Temperature, 5.0 / 9.0, 0.0).with_alias("rankine"));
}

fn register_area_units(builder: &mut RegistryBuilder) {
    builder
        .register(square_meter())
        .register(UnitDefinition::new("km2", "square kilometer", UnitCategory::Area, 1_000_000.0).with_alias("km²"))
        .register(UnitDefinition::new("cm2", "square centimeter", UnitCategory::Area, 0.0001).with_alias("cm²"))
        .register(UnitDefinition::new("mm2", "square millimeter", UnitCategory::Area, 0.000001).with_alias("mm²"))
        .register(UnitDefinition::new("ha", "hectare", UnitCategory::Area, 10000.0).with_alias("hectare"))
        .register(UnitDefinition::new("ac", "acre", UnitCategory::Area, 4046.8564224).with_alias("acre"))
        .register(UnitDefinition::new("ft2", "square foot", UnitCategory::Area, 0.09290304).with_aliases(&["ft²", "sqft"]))
        .register(UnitDefinition::new("in2", "square inch", UnitCategory::Area, 0.00064516).with_alias("in²"))
        .register(UnitDefinition::new("yd2", "square yard", UnitCategory::Area, 0.83612736).with_alias("yd²"));
}

fn register_quantity_units(builder: &mut RegistryBuilder) {
    builder
        .register(piece())
        .register(UnitDefinition::new("pair", "pair", UnitCategory::Quantity, 2.0).with_alias("pairs"))
        .register(dozen())
        .register(UnitDefinition::new("gross", "gross", UnitCategory::Quantity, 144.0))
        .register(UnitDefinition::new("ream", "ream", UnitCategory::Quantity, 500.0).with_alias("reams"));
}

fn register_time_units(builder: &mut RegistryBuilder) {
    builder
        .register(second())
        .register(
            UnitDefinition::new("ms", "millisecond", UnitCategory::Time, 0.001)
                .with_aliases(&["millisecond", "milliseconds"]),
        )
        .register(minute())
        .register(hour())
        .register(UnitDefinition::new("d", "day", UnitCategory::Time, 86400.0).with_aliases(&["day", "days"]))
        .register(UnitDefinition::new("wk", "week", UnitCategory::Time, 604800.0).with_aliases(&["week", "weeks"]));
}
