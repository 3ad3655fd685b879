//! Measura Plugin System
//!
//! Plugins contribute unit modules to a shared registry. The manager
//! filters disabled plugins, initializes the rest in priority order and
//! isolates failures so one broken plugin never blocks the others.

mod config;
mod context;
mod error;
mod manager;
mod provider;
mod traits;

pub use config::{PluginConfig, DISABLED_KEY};
pub use context::{LogLevel, LogSink, PluginContext};
pub use error::PluginError;
pub use manager::{LoadReport, PluginManager, PluginState};
pub use provider::{PluginProvider, StaticProvider};
pub use traits::{DefinitionModule, PluginMeta, UnitModule, UnitPlugin};

/// Common imports for plugin authors
pub mod prelude {
    pub use crate::{
        DefinitionModule, LogLevel, PluginContext, PluginError, PluginMeta, UnitModule, UnitPlugin,
    };
    pub use measura_core::{CustomUnitBuilder, ThreadSafeRegistry, UnitCategory, UnitDefinition, UnitError};
}
