//! Plugin configuration values

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which a list of disabled plugin names may be given
pub const DISABLED_KEY: &str = "disabled";

/// Configuration values visible to every plugin through its context.
///
/// Deserializes from a flat JSON object:
/// `{"disabled": ["legacy"], "packaging.box_size": 12}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginConfig {
    values: HashMap<String, Value>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_f64())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Whether the configuration lists `name` under [`DISABLED_KEY`]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.get(DISABLED_KEY)
            .and_then(|v| v.as_array())
            .map(|names| names.iter().any(|n| n.as_str() == Some(name)))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
