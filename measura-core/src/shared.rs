//! Thread-safe registry publishing immutable snapshots

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use crate::{CustomUnitBuilder, RegistryBuilder, UnitDefinition, UnitError, UnitRegistry};

/// Mutable handle to a current [`UnitRegistry`] snapshot.
///
/// Readers take the shared lock just long enough to clone the `Arc`.
/// Writers build the full replacement first and hold the exclusive lock
/// only for the swap. A separate writer mutex serializes writers so two
/// concurrent updates cannot both start from the same snapshot.
/// Every published snapshot carries a fresh
/// [`generation`](UnitRegistry::generation), so results derived from one
/// snapshot can be told apart from those of its successors.
#[derive(Debug)]
pub struct ThreadSafeRegistry {
    current: RwLock<Arc<UnitRegistry>>,
    writer: Mutex<()>,
}

impl ThreadSafeRegistry {
    pub fn new(initial: UnitRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial.stamped())),
            writer: Mutex::new(()),
        }
    }

    pub fn empty() -> Self {
        Self::new(UnitRegistry::default())
    }

    /// Current snapshot. Its contents never change, even if a write
    /// completes after this call returns.
    pub fn snapshot(&self) -> Arc<UnitRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn get_definition(&self, symbol: &str) -> Option<Arc<UnitDefinition>> {
        self.snapshot().get_definition(symbol)
    }

    pub fn resolve(&self, symbol: &str) -> Result<Arc<UnitDefinition>, UnitError> {
        self.snapshot().resolve(symbol)
    }

    pub fn register(&self, definition: UnitDefinition) {
        self.update(|builder| {
            builder.register(definition);
        });
    }

    /// Register a batch with a single rebuild
    pub fn register_all<I>(&self, definitions: I)
    where
        I: IntoIterator<Item = UnitDefinition>,
    {
        self.update(|builder| {
            for def in definitions {
                builder.register(def);
            }
        });
    }

    pub fn register_custom_unit<F>(&self, f: F) -> Result<(), UnitError>
    where
        F: FnOnce(CustomUnitBuilder) -> CustomUnitBuilder,
    {
        let definition = f(CustomUnitBuilder::new()).build()?;
        self.register(definition);
        Ok(())
    }

    pub fn import_from(&self, other: &UnitRegistry) {
        self.update(|builder| {
            builder.import_from(other);
        });
    }

    /// Apply arbitrary edits to a copy of the current snapshot and publish it
    pub fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut RegistryBuilder),
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut builder = self.snapshot().to_builder();
        edit(&mut builder);
        let next = Arc::new(builder.build().stamped());
        let count = next.len();

        {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = next;
        }
        tracing::debug!("Published registry snapshot with {} symbols", count);
    }

    /// Replace the whole table
    pub fn replace(&self, registry: UnitRegistry) {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(registry.stamped());
    }
}

impl Default for ThreadSafeRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<UnitRegistry> for ThreadSafeRegistry {
    fn from(registry: UnitRegistry) -> Self {
        Self::new(registry)
    }
}
