//! Context handed to plugins during initialization

use std::fmt;
use std::sync::Arc;
use measura_core::ThreadSafeRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::manager::{LoadedPlugin, PluginState};
use crate::{PluginConfig, UnitPlugin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Host callback receiving `(level, plugin name, message)` for every plugin log line
pub type LogSink = Arc<dyn Fn(LogLevel, &str, &str) + Send + Sync>;

/// What a plugin can see of its host while initializing
pub struct PluginContext<'a> {
    plugin: &'a str,
    registry: &'a Arc<ThreadSafeRegistry>,
    config: &'a PluginConfig,
    loaded: &'a [LoadedPlugin],
    sink: Option<&'a LogSink>,
}

impl<'a> PluginContext<'a> {
    pub(crate) fn new(
        plugin: &'a str,
        registry: &'a Arc<ThreadSafeRegistry>,
        config: &'a PluginConfig,
        loaded: &'a [LoadedPlugin],
        sink: Option<&'a LogSink>,
    ) -> Self {
        Self { plugin, registry, config, loaded, sink }
    }

    /// Name of the plugin this context was built for
    pub fn plugin_name(&self) -> &str {
        self.plugin
    }

    pub fn registry(&self) -> &Arc<ThreadSafeRegistry> {
        self.registry
    }

    pub fn config(&self) -> &PluginConfig {
        self.config
    }

    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }

    /// Look up another plugin. Only plugins that finished loading are visible.
    pub fn plugin(&self, name: &str) -> Option<Arc<dyn UnitPlugin>> {
        self.loaded
            .iter()
            .find(|p| p.state == PluginState::Active && p.meta.name.eq_ignore_ascii_case(name))
            .map(|p| Arc::clone(&p.plugin))
    }

    /// Lifecycle state of any plugin seen so far in this load, this one included
    pub fn state(&self, name: &str) -> Option<PluginState> {
        self.loaded
            .iter()
            .find(|p| p.meta.name.eq_ignore_ascii_case(name))
            .map(|p| p.state)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(plugin = self.plugin, "{}", message),
            LogLevel::Debug => tracing::debug!(plugin = self.plugin, "{}", message),
            LogLevel::Info => tracing::info!(plugin = self.plugin, "{}", message),
            LogLevel::Warn => tracing::warn!(plugin = self.plugin, "{}", message),
            LogLevel::Error => tracing::error!(plugin = self.plugin, "{}", message),
        }
        if let Some(sink) = self.sink {
            sink(level, self.plugin, message);
        }
    }
}

impl fmt::Debug for PluginContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin", &self.plugin)
            .field("config", &self.config)
            .field("loaded", &self.loaded.len())
            .finish()
    }
}
