//! Measura Units - typed measures and unit conversion
//!
//! Provides category-safe measures backed by a unit registry, plus a
//! conversion cache for hot conversion paths.
//!
//! Categories:
//! - Length (m, km, cm, ft, in, mi, etc.)
//! - Weight (kg, g, lb, oz, t, etc.)
//! - Volume (l, ml, gal, m3, etc.)
//! - Temperature (K, degC, degF, R)
//! - Area (m2, ha, acre, ft2, etc.)
//! - Quantity (pcs, pair, doz, gross, etc.)
//! - Time (s, min, h, d, etc.)
//!
//! ```
//! use measura_units::Length;
//!
//! let cm = Length::parse("1m").unwrap().to("cm").unwrap();
//! assert!((cm.value() - 100.0).abs() < 1e-9);
//! ```

mod cache;
mod categories;
mod convert;
pub mod defaults;
mod dimension;
mod measure;
mod parse;
mod quantity;

pub use cache::{CacheConfig, CacheKey, CacheStats, ConversionCache};
pub use categories::{Area, Length, Quantity, Temperature, TimeSpan, Volume, Weight};
pub use convert::{convert_value, Converter};
pub use defaults::default_registry;
pub use dimension::{AreaDim, Dimension, LengthDim, QuantityDim, TemperatureDim, TimeDim, VolumeDim, WeightDim};
pub use measure::Measure;
pub use parse::{parse_conversion, split_measure};
