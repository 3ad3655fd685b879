//! Plugin traits

use measura_core::{ThreadSafeRegistry, UnitDefinition, UnitError};
use serde::Serialize;
use crate::{PluginContext, PluginError};

/// Metadata for a unit plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    /// Lower values load first
    pub priority: i32,
}

impl PluginMeta {
    pub const fn new(name: &'static str, priority: i32) -> Self {
        Self { name, description: "", version: "0.1.0", priority }
    }
}

/// A discoverable, lifecycle-managed provider of unit modules
///
/// Failures are isolated only when reported through `Err`. A panic in
/// `initialize`, a module or `shutdown` is not caught and unwinds through
/// the manager.
pub trait UnitPlugin: Send + Sync {
    fn meta(&self) -> PluginMeta;

    /// Disabled plugins are filtered out before initialization
    fn is_enabled(&self) -> bool {
        true
    }

    /// Called once, before any module is configured
    fn initialize(&self, _ctx: &PluginContext<'_>) -> Result<(), PluginError> {
        Ok(())
    }

    fn modules(&self) -> Vec<Box<dyn UnitModule>> {
        Vec::new()
    }

    /// Called on unload. Definitions already registered stay registered.
    fn shutdown(&self) {}
}

/// A batch of related unit definitions registered together
pub trait UnitModule: Send + Sync {
    fn name(&self) -> &str;
    fn configure(&self, registry: &ThreadSafeRegistry) -> Result<(), UnitError>;
}

/// Module backed by a fixed list of definitions, published in one rebuild
#[derive(Debug, Clone)]
pub struct DefinitionModule {
    name: String,
    definitions: Vec<UnitDefinition>,
}

impl DefinitionModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            definitions: Vec::new(),
        }
    }

    pub fn with_unit(mut self, definition: UnitDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.definitions
    }
}

impl UnitModule for DefinitionModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&self, registry: &ThreadSafeRegistry) -> Result<(), UnitError> {
        registry.register_all(self.definitions.iter().cloned());
        Ok(())
    }
}
