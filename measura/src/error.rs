//! Engine errors

use measura_core::UnitError;
use measura_plugin::PluginError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

impl EngineError {
    /// Machine-readable code, matching [`measura_core::codes`] for unit errors
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "INVALID_CONFIG",
            Self::Unit(err) => err.code(),
            Self::Plugin(_) => "PLUGIN_ERROR",
        }
    }
}
