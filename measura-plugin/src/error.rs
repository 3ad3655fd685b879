//! Plugin errors

use measura_core::UnitError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    #[error("Plugin '{name}' failed to initialize: {reason}")]
    Initialization { name: String, reason: String },

    #[error("Module '{module}' of plugin '{plugin}' failed: {source}")]
    Module {
        plugin: String,
        module: String,
        #[source]
        source: UnitError,
    },

    #[error("Plugin not loaded: {0}")]
    NotLoaded(String),

    #[error("Plugin already loaded: {0}")]
    Duplicate(String),
}

impl PluginError {
    pub fn initialization(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Initialization {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
