//! Category markers for typed measures
//!
//! Each marker ties a [`Measure`](crate::Measure) type parameter to one
//! [`UnitCategory`], so a length and a weight are different Rust types.

use std::fmt::Debug;
use std::hash::Hash;
use measura_core::UnitCategory;

/// Compile-time category tag
pub trait Dimension: Debug + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static {
    const CATEGORY: UnitCategory;
}

macro_rules! dimension {
    ($(#[$doc:meta])* $name:ident => $category:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Dimension for $name {
            const CATEGORY: UnitCategory = UnitCategory::$category;
        }
    };
}

dimension!(
    /// Length [L]
    LengthDim => Length
);
dimension!(
    /// Weight (mass)
    WeightDim => Weight
);
dimension!(
    /// Volume [L^3]
    VolumeDim => Volume
);
dimension!(
    /// Temperature, converted through affine transforms
    TemperatureDim => Temperature
);
dimension!(
    /// Area [L^2]
    AreaDim => Area
);
dimension!(
    /// Discrete counts
    QuantityDim => Quantity
);
dimension!(
    /// Time [T]
    TimeDim => Time
);
