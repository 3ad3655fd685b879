//! Plugin lifecycle management

use std::sync::Arc;
use measura_core::ThreadSafeRegistry;
use serde::Serialize;
use crate::context::{LogLevel, LogSink, PluginContext};
use crate::{PluginConfig, PluginError, PluginMeta, PluginProvider, UnitPlugin};

/// Lifecycle position of a plugin the manager has seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// Accepted for loading; `initialize` has not returned yet
    Discovered,
    /// `initialize` succeeded; modules are being configured
    Initialized,
    Active,
    Shutdown,
    /// `initialize` or a module failed. Loading the name again retries it.
    Failed,
}

pub(crate) struct LoadedPlugin {
    pub(crate) plugin: Arc<dyn UnitPlugin>,
    pub(crate) meta: PluginMeta,
    pub(crate) state: PluginState,
    pub(crate) modules: Vec<String>,
}

/// Outcome of one loading pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Names in load order
    pub loaded: Vec<String>,
    pub failed: Vec<(String, PluginError)>,
    pub disabled: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Discovers, orders, initializes and unloads unit plugins.
///
/// One plugin failing never stops the others from loading. Definitions a
/// plugin registered stay in the registry after it is unloaded.
pub struct PluginManager {
    registry: Arc<ThreadSafeRegistry>,
    config: PluginConfig,
    plugins: Vec<LoadedPlugin>,
    /// Names shut down by an unload; only the name is retained
    unloaded: Vec<&'static str>,
    sink: Option<LogSink>,
}

impl PluginManager {
    pub fn new(registry: Arc<ThreadSafeRegistry>) -> Self {
        Self {
            registry,
            config: PluginConfig::default(),
            plugins: Vec::new(),
            unloaded: Vec::new(),
            sink: None,
        }
    }

    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_log_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn registry(&self) -> &Arc<ThreadSafeRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn load_from(&mut self, provider: &dyn PluginProvider) -> LoadReport {
        self.load_all(provider.plugins())
    }

    /// Filter out disabled candidates, then initialize the rest in ascending
    /// priority. Equal priorities keep their discovery order.
    pub fn load_all(&mut self, candidates: Vec<Arc<dyn UnitPlugin>>) -> LoadReport {
        let mut report = LoadReport::default();
        let mut enabled = Vec::with_capacity(candidates.len());

        for plugin in candidates {
            let meta = plugin.meta();
            if !plugin.is_enabled() || self.config.is_disabled(meta.name) {
                tracing::debug!(plugin = meta.name, "Plugin disabled, skipping");
                report.disabled.push(meta.name.to_string());
            } else {
                enabled.push((meta, plugin));
            }
        }
        enabled.sort_by_key(|(meta, _)| meta.priority);

        tracing::info!(count = enabled.len(), "Loading plugins");
        for (meta, plugin) in enabled {
            let name = meta.name.to_string();
            match self.load_one(meta, plugin) {
                Ok(()) => report.loaded.push(name),
                Err(err) => report.failed.push((name, err)),
            }
        }

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            disabled = report.disabled.len(),
            "Plugin loading complete"
        );
        report
    }

    /// Load a single plugin. A disabled plugin is skipped without error.
    pub fn load<P: UnitPlugin + 'static>(&mut self, plugin: P) -> Result<(), PluginError> {
        let plugin: Arc<dyn UnitPlugin> = Arc::new(plugin);
        match self.load_all(vec![plugin]).failed.pop() {
            Some((_, err)) => Err(err),
            None => Ok(()),
        }
    }

    fn load_one(&mut self, meta: PluginMeta, plugin: Arc<dyn UnitPlugin>) -> Result<(), PluginError> {
        let name = meta.name;
        if let Some(pos) = self.position(name) {
            if self.plugins[pos].state != PluginState::Failed {
                tracing::warn!(plugin = name, "Plugin already loaded, skipping duplicate");
                return Err(PluginError::Duplicate(name.to_string()));
            }
            self.plugins.remove(pos);
        }
        self.unloaded.retain(|n| !n.eq_ignore_ascii_case(name));
        tracing::debug!(plugin = name, priority = meta.priority, "Initializing plugin");

        let idx = self.plugins.len();
        self.plugins.push(LoadedPlugin {
            plugin: Arc::clone(&plugin),
            meta,
            state: PluginState::Discovered,
            modules: Vec::new(),
        });

        let init = {
            let ctx = PluginContext::new(name, &self.registry, &self.config, &self.plugins, self.sink.as_ref());
            plugin.initialize(&ctx)
        };
        if let Err(err) = init {
            tracing::warn!(plugin = name, error = %err, "Plugin initialization failed");
            self.plugins[idx].state = PluginState::Failed;
            return Err(err);
        }
        self.plugins[idx].state = PluginState::Initialized;

        for module in plugin.modules() {
            if let Err(source) = module.configure(&self.registry) {
                let err = PluginError::Module {
                    plugin: name.to_string(),
                    module: module.name().to_string(),
                    source,
                };
                tracing::warn!(plugin = name, module = module.name(), error = %err, "Module configuration failed");
                plugin.shutdown();
                self.plugins[idx].state = PluginState::Failed;
                return Err(err);
            }
            tracing::debug!(plugin = name, module = module.name(), "Module configured");
            self.plugins[idx].modules.push(module.name().to_string());
        }

        let entry = &mut self.plugins[idx];
        entry.state = PluginState::Active;
        tracing::info!(plugin = name, modules = entry.modules.len(), "Plugin loaded");
        Ok(())
    }

    /// Shut a plugin down and drop its bookkeeping, keeping only the name
    /// so [`state`](Self::state) reports `Shutdown`. Its registered
    /// definitions remain.
    pub fn unload(&mut self, name: &str) -> Result<(), PluginError> {
        let pos = self
            .position(name)
            .ok_or_else(|| PluginError::NotLoaded(name.to_string()))?;
        let entry = self.plugins.remove(pos);
        self.retire(entry);
        Ok(())
    }

    /// Unload everything, most recently loaded first
    pub fn unload_all(&mut self) {
        while let Some(entry) = self.plugins.pop() {
            self.retire(entry);
        }
    }

    fn retire(&mut self, entry: LoadedPlugin) {
        if entry.state == PluginState::Active {
            entry.plugin.shutdown();
        }
        tracing::info!(plugin = entry.meta.name, state = ?PluginState::Shutdown, "Plugin unloaded");
        self.unloaded.push(entry.meta.name);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plugins
            .iter()
            .position(|p| p.meta.name.eq_ignore_ascii_case(name))
    }

    /// An active plugin by name
    pub fn plugin(&self, name: &str) -> Option<Arc<dyn UnitPlugin>> {
        self.plugins
            .iter()
            .find(|p| p.state == PluginState::Active && p.meta.name.eq_ignore_ascii_case(name))
            .map(|p| Arc::clone(&p.plugin))
    }

    pub fn state(&self, name: &str) -> Option<PluginState> {
        match self.position(name) {
            Some(pos) => Some(self.plugins[pos].state),
            None => self
                .unloaded
                .iter()
                .any(|n| n.eq_ignore_ascii_case(name))
                .then_some(PluginState::Shutdown),
        }
    }

    pub fn meta(&self, name: &str) -> Option<&PluginMeta> {
        self.position(name).map(|pos| &self.plugins[pos].meta)
    }

    /// Names of the modules a plugin configured
    pub fn modules(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|pos| self.plugins[pos].modules.as_slice())
    }

    /// Active plugins, in load order
    pub fn loaded_names(&self) -> Vec<&'static str> {
        self.plugins
            .iter()
            .filter(|p| p.state == PluginState::Active)
            .map(|p| p.meta.name)
            .collect()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.plugin(name).is_some()
    }
}
