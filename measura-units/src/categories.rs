//! Concrete measure types and their named constructors
//!
//! Named constructors use the default unit definitions directly and
//! bypass parsing and registry lookup. Like every other constructor they
//! reject non-finite values.

use measura_core::UnitError;
use crate::defaults;
use crate::dimension::{AreaDim, LengthDim, QuantityDim, TemperatureDim, TimeDim, VolumeDim, WeightDim};
use crate::Measure;

pub type Length = Measure<LengthDim>;
pub type Weight = Measure<WeightDim>;
pub type Volume = Measure<VolumeDim>;
pub type Temperature = Measure<TemperatureDim>;
pub type Area = Measure<AreaDim>;
pub type Quantity = Measure<QuantityDim>;
pub type TimeSpan = Measure<TimeDim>;

impl Measure<LengthDim> {
    pub fn meters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::meter())
    }

    pub fn centimeters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::centimeter())
    }

    pub fn millimeters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::millimeter())
    }

    pub fn kilometers(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::kilometer())
    }

    pub fn inches(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::inch())
    }

    pub fn feet(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::foot())
    }
}

impl Measure<WeightDim> {
    pub fn kilograms(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::kilogram())
    }

    pub fn grams(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::gram())
    }

    pub fn pounds(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::pound())
    }
}

impl Measure<VolumeDim> {
    pub fn liters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::liter())
    }

    pub fn milliliters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::milliliter())
    }
}

impl Measure<TemperatureDim> {
    pub fn kelvin(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::kelvin())
    }

    pub fn celsius(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::celsius())
    }

    pub fn fahrenheit(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::fahrenheit())
    }
}

impl Measure<AreaDim> {
    pub fn square_meters(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::square_meter())
    }
}

impl Measure<QuantityDim> {
    pub fn pieces(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::piece())
    }

    pub fn dozens(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::dozen())
    }
}

impl Measure<TimeDim> {
    pub fn seconds(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::second())
    }

    pub fn minutes(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::minute())
    }

    pub fn hours(value: f64) -> Result<Self, UnitError> {
        Self::with_unit(value, defaults::hour())
    }
}
