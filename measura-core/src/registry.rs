//! Unit registry: immutable snapshots and the builder that produces them

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use crate::{CustomUnitBuilder, UnitCategory, UnitDefinition, UnitError};

/// Source of publish generations, shared by every thread-safe registry
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Immutable, fully-built registry state
///
/// Keys are lowercased symbols; aliases are separate keys sharing the
/// same `Arc<UnitDefinition>`. Safe to share across threads without locking.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<String, Arc<UnitDefinition>>,
    by_category: BTreeMap<UnitCategory, Vec<Arc<UnitDefinition>>>,
    generation: u64,
}

impl UnitRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A builder pre-populated with this snapshot's definitions
    pub fn to_builder(&self) -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder.import_from(self);
        builder
    }

    /// Case-insensitive lookup by symbol or alias
    pub fn get_definition(&self, symbol: &str) -> Option<Arc<UnitDefinition>> {
        self.units.get(&normalize(symbol)).cloned()
    }

    /// Like [`get_definition`](Self::get_definition), treating absence as an error
    pub fn resolve(&self, symbol: &str) -> Result<Arc<UnitDefinition>, UnitError> {
        self.get_definition(symbol)
            .ok_or_else(|| UnitError::unknown_unit(symbol.trim()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.contains_key(&normalize(symbol))
    }

    /// Ratio `from.base_ratio / to.base_ratio`.
    ///
    /// `None` when either symbol is unknown, the categories differ, or
    /// either unit is affine (a ratio alone cannot express the offset).
    pub fn get_conversion_ratio(&self, from: &str, to: &str) -> Option<f64> {
        let from_def = self.get_definition(from)?;
        let to_def = self.get_definition(to)?;
        if from_def.category() != to_def.category() {
            return None;
        }
        if from_def.conversion().is_affine() || to_def.conversion().is_affine() {
            return None;
        }
        Some(from_def.base_ratio() / to_def.base_ratio())
    }

    /// Distinct definitions in a category, sorted by canonical symbol
    pub fn get_units_by_category(&self, category: UnitCategory) -> Vec<Arc<UnitDefinition>> {
        self.by_category.get(&category).cloned().unwrap_or_default()
    }

    /// Canonical symbols in a category
    pub fn symbols_in(&self, category: UnitCategory) -> Vec<String> {
        self.by_category
            .get(&category)
            .map(|defs| defs.iter().map(|d| d.symbol().to_string()).collect())
            .unwrap_or_default()
    }

    /// First definition flagged as base unit for the category
    pub fn base_unit(&self, category: UnitCategory) -> Option<Arc<UnitDefinition>> {
        self.by_category
            .get(&category)?
            .iter()
            .find(|d| d.is_base_unit())
            .cloned()
    }

    /// Categories with at least one registered unit
    pub fn categories(&self) -> Vec<UnitCategory> {
        self.by_category.keys().copied().collect()
    }

    /// All registered keys (canonical symbols and aliases, lowercased)
    pub fn symbols(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered keys, aliases included
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of distinct definitions
    pub fn definition_count(&self) -> usize {
        self.by_category.values().map(|v| v.len()).sum()
    }

    /// Publish stamp. Zero for a snapshot never published through a
    /// [`ThreadSafeRegistry`](crate::ThreadSafeRegistry); otherwise unique
    /// per publish across the process.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn stamped(mut self) -> Self {
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        self
    }
}

/// Copy-on-write builder accumulating definitions before freezing them
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    units: HashMap<String, Arc<UnitDefinition>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite the canonical symbol and every alias.
    /// Last write wins.
    pub fn register(&mut self, definition: UnitDefinition) -> &mut Self {
        self.register_shared(Arc::new(definition))
    }

    /// Register an already shared definition, keeping its identity
    pub fn register_shared(&mut self, definition: Arc<UnitDefinition>) -> &mut Self {
        for symbol in definition.all_symbols() {
            let key = normalize(symbol);
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = self.units.insert(key, Arc::clone(&definition)) {
                if !Arc::ptr_eq(&previous, &definition) {
                    tracing::debug!(
                        "Unit symbol '{}' overridden: {} -> {}",
                        symbol,
                        previous.display_name(),
                        definition.display_name()
                    );
                }
            }
        }
        self
    }

    /// Build a definition through a [`CustomUnitBuilder`] and register it
    pub fn register_custom_unit<F>(&mut self, f: F) -> Result<&mut Self, UnitError>
    where
        F: FnOnce(CustomUnitBuilder) -> CustomUnitBuilder,
    {
        let definition = f(CustomUnitBuilder::new()).build()?;
        Ok(self.register(definition))
    }

    /// Merge every key of another snapshot into this builder
    pub fn import_from(&mut self, other: &UnitRegistry) -> &mut Self {
        for (key, def) in &other.units {
            self.units.insert(key.clone(), Arc::clone(def));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Freeze into an immutable snapshot and compute the category index.
    ///
    /// The index holds each definition once, however many keys point to it.
    pub fn build(&self) -> UnitRegistry {
        let mut seen: HashSet<*const UnitDefinition> = HashSet::new();
        let mut by_category: BTreeMap<UnitCategory, Vec<Arc<UnitDefinition>>> = BTreeMap::new();

        for def in self.units.values() {
            if seen.insert(Arc::as_ptr(def)) {
                by_category.entry(def.category()).or_default().push(Arc::clone(def));
            }
        }
        for defs in by_category.values_mut() {
            defs.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        }

        UnitRegistry {
            units: self.units.clone(),
            by_category,
            generation: 0,
        }
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> UnitDefinition {
        UnitDefinition::new("m", "meter", UnitCategory::Length, 1.0)
            .base()
            .with_aliases(&["meter", "meters", "metre"])
    }

    fn centimeter() -> UnitDefinition {
        UnitDefinition::new("cm", "centimeter", UnitCategory::Length, 0.01)
    }

    fn kilogram() -> UnitDefinition {
        UnitDefinition::new("kg", "kilogram", UnitCategory::Weight, 1.0).base()
    }

    fn celsius() -> UnitDefinition {
        UnitDefinition::affine("degC", "degree Celsius", UnitCategory::Temperature, 1.0, 273.15)
    }

    fn sample() -> UnitRegistry {
        let mut builder = UnitRegistry::builder();
        builder.register(meter()).register(centimeter()).register(kilogram()).register(celsius());
        builder.build()
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = sample();
        assert_eq!(registry.get_definition("M").unwrap().symbol(), "m");
        assert_eq!(registry.get_definition(" Meters ").unwrap().symbol(), "m");
        assert_eq!(registry.get_definition("DEGC").unwrap().symbol(), "degC");
        assert!(registry.get_definition("xyz").is_none());
    }

    #[test]
    fn test_aliases_share_identity() {
        let registry = sample();
        let a = registry.get_definition("m").unwrap();
        let b = registry.get_definition("metre").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = sample();
        assert_eq!(registry.resolve("xyz").unwrap_err(), UnitError::unknown_unit("xyz"));
    }

    #[test]
    fn test_conversion_ratio() {
        let registry = sample();
        assert_eq!(registry.get_conversion_ratio("m", "cm"), Some(100.0));
        assert_eq!(registry.get_conversion_ratio("m", "kg"), None);
        assert_eq!(registry.get_conversion_ratio("m", "xyz"), None);
        assert_eq!(registry.get_conversion_ratio("degC", "degC"), None);
    }

    #[test]
    fn test_category_index_deduplicates_aliases() {
        let registry = sample();
        let lengths = registry.get_units_by_category(UnitCategory::Length);
        assert_eq!(lengths.len(), 2);
        assert_eq!(registry.symbols_in(UnitCategory::Length), vec!["cm", "m"]);
        assert_eq!(registry.definition_count(), 4);
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_base_unit() {
        let registry = sample();
        assert_eq!(registry.base_unit(UnitCategory::Length).unwrap().symbol(), "m");
        assert!(registry.base_unit(UnitCategory::Temperature).is_none());
        assert!(registry.base_unit(UnitCategory::Area).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut builder = UnitRegistry::builder();
        builder.register(centimeter());
        builder.register(UnitDefinition::new("cm", "custom cm", UnitCategory::Length, 0.02));
        let registry = builder.build();
        assert_eq!(registry.get_definition("cm").unwrap().display_name(), "custom cm");
        assert_eq!(registry.get_units_by_category(UnitCategory::Length).len(), 1);
    }

    #[test]
    fn test_import_from() {
        let base = sample();
        let mut builder = UnitRegistry::builder();
        builder
            .import_from(&base)
            .register(UnitDefinition::new("ft", "foot", UnitCategory::Length, 0.3048));
        let extended = builder.build();

        assert!(extended.contains("ft"));
        assert!(extended.contains("kg"));
        assert!(!base.contains("ft"));
        let original = base.get_definition("m").unwrap();
        let imported = extended.get_definition("m").unwrap();
        assert!(Arc::ptr_eq(&original, &imported));
    }

    #[test]
    fn test_register_custom_unit() {
        let mut builder = UnitRegistry::builder();
        builder
            .register_custom_unit(|b| {
                b.symbol("crate")
                    .category(UnitCategory::Quantity)
                    .base_ratio(24.0)
                    .alias("crates")
            })
            .unwrap();
        let registry = builder.build();
        assert_eq!(registry.get_definition("CRATES").unwrap().base_ratio(), 24.0);

        let err = builder.register_custom_unit(|b| b.symbol("bad")).unwrap_err();
        assert!(matches!(err, UnitError::InvalidArgument(_)));
    }

    #[test]
    fn test_categories() {
        let registry = sample();
        assert_eq!(
            registry.categories(),
            vec![UnitCategory::Length, UnitCategory::Weight, UnitCategory::Temperature]
        );
    }
}
