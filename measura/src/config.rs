//! Engine configuration

use measura_core::RoundingMode;
use measura_plugin::PluginConfig;
use measura_units::CacheConfig;
use serde::{Deserialize, Serialize};
use crate::EngineError;

/// Everything an [`Engine`](crate::Engine) needs at startup.
///
/// ```json
/// {
///   "cache": { "max_size": 500, "ttl_ms": 60000 },
///   "plugins": { "disabled": ["legacy"] },
///   "default_units": true,
///   "rounding": "half_even"
/// }
/// ```
///
/// `"cache": null` turns conversion caching off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cache: Option<CacheConfig>,
    pub plugins: PluginConfig,
    /// Seed the registry with the built-in unit tables
    pub default_units: bool,
    pub rounding: RoundingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache: Some(CacheConfig::default()),
            plugins: PluginConfig::default(),
            default_units: true,
            rounding: RoundingMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn with_plugins(mut self, plugins: PluginConfig) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_default_units(mut self, enabled: bool) -> Self {
        self.default_units = enabled;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}
