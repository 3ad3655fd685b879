//! Engine wiring: registry, plugins and conversion cache

use std::sync::Arc;
use measura_core::{ThreadSafeRegistry, UnitError, UnitRegistry};
use measura_plugin::{LoadReport, LogLevel, LogSink, PluginManager, PluginProvider, StaticProvider, UnitPlugin};
use measura_units::{defaults, CacheStats, ConversionCache, Converter, Dimension, Measure};
use crate::EngineConfig;

/// A ready-to-use unit engine
pub struct Engine {
    registry: Arc<ThreadSafeRegistry>,
    converter: Converter,
    plugins: PluginManager,
    report: LoadReport,
    config: EngineConfig,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ThreadSafeRegistry> {
        &self.registry
    }

    /// Current registry contents. Later registrations do not affect it.
    pub fn snapshot(&self) -> Arc<UnitRegistry> {
        self.registry.snapshot()
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
        self.converter.convert(value, from, to)
    }

    pub fn convert_with_precision(
        &self,
        value: f64,
        from: &str,
        to: &str,
        precision: u32,
    ) -> Result<f64, UnitError> {
        self.converter.convert_with_precision(value, from, to, Some(precision))
    }

    /// Convert a request such as "5 km -> mi"
    pub fn convert_text(&self, text: &str) -> Result<f64, UnitError> {
        self.converter.convert_text(text)
    }

    pub fn parse<D: Dimension>(&self, text: &str) -> Result<Measure<D>, UnitError> {
        Measure::parse_in(&self.snapshot(), text)
    }

    pub fn of<D: Dimension>(&self, value: f64, symbol: &str) -> Result<Measure<D>, UnitError> {
        Measure::of_in(&self.snapshot(), value, symbol)
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginManager {
        &mut self.plugins
    }

    /// Outcome of the startup plugin load
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.converter.cache().map(|cache| cache.stats())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = self.converter.cache() {
            cache.clear();
        }
    }

    /// Unload every plugin and drop cached conversions. Registered units remain.
    pub fn shutdown(&mut self) {
        self.plugins.unload_all();
        self.clear_cache();
        tracing::info!("Engine shut down");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Engine`]
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    registry: Option<UnitRegistry>,
    providers: Vec<Box<dyn PluginProvider>>,
    plugins: StaticProvider,
    sink: Option<LogSink>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial units. Layered over the built-in tables unless `default_units` is off.
    pub fn registry(mut self, registry: UnitRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn provider<P: PluginProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn plugin<P: UnitPlugin + 'static>(mut self, plugin: P) -> Self {
        self.plugins = self.plugins.with_plugin(plugin);
        self
    }

    pub fn log_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(LogLevel, &str, &str) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn build(self) -> Engine {
        let initial = match (self.registry, self.config.default_units) {
            (Some(given), true) => defaults::builder().import_from(&given).build(),
            (Some(given), false) => given,
            (None, true) => defaults::registry(),
            (None, false) => UnitRegistry::default(),
        };
        let registry = Arc::new(ThreadSafeRegistry::new(initial));

        // All providers share one priority ordering
        let mut candidates = self.plugins.plugins();
        for provider in &self.providers {
            candidates.extend(provider.plugins());
        }

        let mut plugins = PluginManager::new(Arc::clone(&registry)).with_config(self.config.plugins.clone());
        if let Some(sink) = self.sink {
            plugins = plugins.with_log_sink(move |level, plugin, message| sink(level, plugin, message));
        }
        let report = plugins.load_all(candidates);

        let mut converter = Converter::new(Arc::clone(&registry)).with_rounding(self.config.rounding);
        if let Some(cache) = &self.config.cache {
            converter = converter.with_cache(Arc::new(ConversionCache::from_config(cache)));
        }

        tracing::info!(
            units = registry.snapshot().len(),
            plugins = plugins.loaded_names().len(),
            cache = self.config.cache.is_some(),
            "Engine ready"
        );

        Engine {
            registry,
            converter,
            plugins,
            report,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura_core::{UnitCategory, UnitDefinition};
    use measura_plugin::prelude::*;
    use measura_plugin::PluginConfig;
    use measura_units::{Length, LengthDim, QuantityDim, TemperatureDim, WeightDim};
    use std::sync::Mutex;

    struct Packaging {
        shutdowns: Arc<Mutex<u32>>,
    }

    impl UnitPlugin for Packaging {
        fn meta(&self) -> PluginMeta {
            PluginMeta::new("packaging", 10)
        }

        fn initialize(&self, ctx: &PluginContext<'_>) -> Result<(), PluginError> {
            ctx.log(LogLevel::Info, "registering packaging units");
            Ok(())
        }

        fn modules(&self) -> Vec<Box<dyn UnitModule>> {
            vec![Box::new(
                DefinitionModule::new("crates")
                    .with_unit(UnitDefinition::new("crate", "crate", UnitCategory::Quantity, 24.0).with_alias("crates")),
            )]
        }

        fn shutdown(&self) {
            *self.shutdowns.lock().unwrap() += 1;
        }
    }

    fn packaging() -> (Packaging, Arc<Mutex<u32>>) {
        let shutdowns = Arc::new(Mutex::new(0));
        (Packaging { shutdowns: Arc::clone(&shutdowns) }, shutdowns)
    }

    #[test]
    fn test_default_engine() {
        let engine = Engine::default();
        assert_eq!(engine.convert(5.0, "km", "m").unwrap(), 5000.0);
        assert!((engine.convert(100.0, "degC", "degF").unwrap() - 212.0).abs() < 1e-9);
        assert_eq!(engine.convert_with_precision(1.0, "mi", "km", 2).unwrap(), 1.61);
        assert!(engine.load_report().loaded.is_empty());
    }

    #[test]
    fn test_typed_parse_and_of() {
        let engine = Engine::default();
        let snapshot = engine.snapshot();

        let feet = engine.parse::<LengthDim>("1ft").unwrap();
        assert!((feet.to_in(&snapshot, "in").unwrap().value() - 12.0).abs() < 1e-9);

        let mass = engine.of::<WeightDim>(2.0, "kg").unwrap();
        assert_eq!(mass.symbol(), "kg");

        assert!(matches!(engine.parse::<LengthDim>("5kg"), Err(UnitError::CategoryMismatch { .. })));
        assert!(engine.of::<TemperatureDim>(1.0, "m").is_err());
    }

    #[test]
    fn test_plugin_units_are_usable() {
        let (plugin, _) = packaging();
        let engine = Engine::builder().plugin(plugin).build();

        assert_eq!(engine.load_report().loaded, vec!["packaging"]);
        assert_eq!(engine.convert(2.0, "crates", "pcs").unwrap(), 48.0);

        let crates = engine.of::<QuantityDim>(1.0, "crate").unwrap();
        assert_eq!(crates.to_in(&engine.snapshot(), "doz").unwrap().value(), 2.0);
    }

    #[test]
    fn test_config_disables_plugin() {
        let (plugin, _) = packaging();
        let config = EngineConfig::default()
            .with_plugins(PluginConfig::new().with("disabled", serde_json::json!(["packaging"])));
        let engine = Engine::builder().config(config).plugin(plugin).build();

        assert_eq!(engine.load_report().disabled, vec!["packaging"]);
        assert!(engine.convert(1.0, "crate", "pcs").is_err());
    }

    #[test]
    fn test_custom_registry_without_defaults() {
        let registry = UnitRegistry::builder()
            .register(UnitDefinition::new("u", "unit", UnitCategory::Length, 1.0).base())
            .register(UnitDefinition::new("ku", "kilounit", UnitCategory::Length, 1000.0))
            .build();
        let engine = Engine::builder()
            .config(EngineConfig::default().with_default_units(false))
            .registry(registry)
            .build();

        assert_eq!(engine.convert(2.0, "ku", "u").unwrap(), 2000.0);
        assert!(matches!(engine.convert(1.0, "m", "cm"), Err(UnitError::UnknownUnit(_))));
    }

    #[test]
    fn test_custom_registry_layered_on_defaults() {
        let registry = UnitRegistry::builder()
            .register(UnitDefinition::new("league", "league", UnitCategory::Length, 4828.032))
            .build();
        let engine = Engine::builder().registry(registry).build();

        assert!((engine.convert(1.0, "league", "km").unwrap() - 4.828032).abs() < 1e-9);
        assert_eq!(engine.convert(1.0, "m", "cm").unwrap(), 100.0);
    }

    #[test]
    fn test_cache_stats() {
        let engine = Engine::default();
        engine.convert(1.0, "kg", "g").unwrap();
        engine.convert(1.0, "kg", "g").unwrap();

        let stats = engine.cache_stats().unwrap();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 1);

        engine.clear_cache();
        assert_eq!(engine.cache_stats().unwrap().size, 0);

        let uncached = Engine::builder()
            .config(EngineConfig::default().without_cache())
            .build();
        assert!(uncached.cache_stats().is_none());
    }

    #[test]
    fn test_override_bypasses_cached_result() {
        let engine = Engine::default();
        assert_eq!(engine.convert(1.0, "ft", "m").unwrap(), 0.3048);

        engine
            .registry()
            .register(UnitDefinition::new("ft", "survey foot", UnitCategory::Length, 1200.0 / 3937.0));
        assert_eq!(engine.convert(1.0, "ft", "m").unwrap(), 1200.0 / 3937.0);
        assert_eq!(engine.cache_stats().unwrap().hits, 0);

        engine.convert(1.0, "ft", "m").unwrap();
        assert_eq!(engine.cache_stats().unwrap().hits, 1);
    }

    #[test]
    fn test_runtime_registration_visible() {
        let engine = Engine::default();
        let before = engine.snapshot();
        engine
            .registry()
            .register_custom_unit(|b| {
                b.symbol("fathom")
                    .display_name("fathom")
                    .category(UnitCategory::Length)
                    .base_ratio(1.8288)
            })
            .unwrap();

        assert!(before.get_definition("fathom").is_none());
        let depth = engine.parse::<LengthDim>("10 fathom").unwrap();
        let meters: Length = depth.to_in(&engine.snapshot(), "m").unwrap();
        assert!((meters.value() - 18.288).abs() < 1e-9);
    }

    #[test]
    fn test_log_sink_and_shutdown() {
        let (plugin, shutdowns) = packaging();
        let logs = Arc::new(Mutex::new(Vec::new()));
        let sink_logs = Arc::clone(&logs);

        let mut engine = Engine::builder()
            .plugin(plugin)
            .log_sink(move |_, plugin, message| {
                sink_logs.lock().unwrap().push(format!("{}: {}", plugin, message));
            })
            .build();

        assert_eq!(*logs.lock().unwrap(), vec!["packaging: registering packaging units"]);

        engine.convert(1.0, "crate", "pcs").unwrap();
        engine.shutdown();
        assert_eq!(*shutdowns.lock().unwrap(), 1);
        assert!(engine.plugins().loaded_names().is_empty());
        assert_eq!(engine.cache_stats().unwrap().size, 0);
        assert_eq!(engine.convert(1.0, "crate", "pcs").unwrap(), 24.0);
    }
}
