//! Measura - typed unit-of-measure engine
//!
//! Wires a shared unit registry, the plugin manager and a conversion cache
//! behind a single [`Engine`].
//!
//! ```
//! use measura::{Engine, LengthDim};
//!
//! let engine = Engine::default();
//! assert_eq!(engine.convert(5.0, "km", "m").unwrap(), 5000.0);
//!
//! let run = engine.parse::<LengthDim>("10 km").unwrap();
//! assert_eq!(run.to_in(&engine.snapshot(), "m").unwrap().value(), 10000.0);
//! ```

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;

pub use measura_core::{
    codes, Conversion, CustomUnitBuilder, RegistryBuilder, RoundingMode, ThreadSafeRegistry,
    UnitCategory, UnitDefinition, UnitError, UnitRegistry,
};
pub use measura_plugin::{
    DefinitionModule, LoadReport, LogLevel, PluginConfig, PluginContext, PluginError, PluginManager,
    PluginMeta, PluginProvider, PluginState, StaticProvider, UnitModule, UnitPlugin,
};
pub use measura_units::{
    defaults, Area, AreaDim, CacheConfig, CacheStats, ConversionCache, Converter, Dimension, Length,
    LengthDim, Measure, Quantity, QuantityDim, Temperature, TemperatureDim, TimeDim, TimeSpan, Volume,
    VolumeDim, Weight, WeightDim,
};
