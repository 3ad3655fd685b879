//! Plugin discovery

use std::sync::Arc;
use crate::UnitPlugin;

/// Source of candidate plugins. Order is irrelevant; the manager sorts by priority.
pub trait PluginProvider {
    fn plugins(&self) -> Vec<Arc<dyn UnitPlugin>>;
}

/// Fixed list of plugins assembled at compile time
#[derive(Default, Clone)]
pub struct StaticProvider {
    plugins: Vec<Arc<dyn UnitPlugin>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin<P: UnitPlugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn with_shared(mut self, plugin: Arc<dyn UnitPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginProvider for StaticProvider {
    fn plugins(&self) -> Vec<Arc<dyn UnitPlugin>> {
        self.plugins.clone()
    }
}
