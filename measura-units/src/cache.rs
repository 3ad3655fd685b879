//! Bounded, time-expiring cache of conversion results
//!
//! Entries expire lazily: an entry older than the TTL is dropped when it is
//! next read. When full, the entry with the oldest creation time is evicted
//! (creation order, not access order).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use measura_core::RoundingMode;
use serde::{Serialize, Deserialize};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Target number of entries
    pub max_size: usize,
    /// Entry lifetime in milliseconds
    pub ttl_ms: u64,
}

impl CacheConfig {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            max_size,
            ttl_ms: ttl.as_millis() as u64,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            ttl_ms: 5 * 60 * 1000,
        }
    }
}

/// Cache key: value, unit pair, precision and rounding, plus the
/// generation of the registry snapshot the result was computed from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    value_bits: u64,
    from: String,
    to: String,
    precision: Option<u32>,
    rounding: RoundingMode,
    generation: u64,
}

impl CacheKey {
    /// Unit symbols are compared case-insensitively, like registry lookups
    pub fn new(value: f64, from: &str, to: &str, precision: Option<u32>) -> Self {
        Self {
            value_bits: (value + 0.0).to_bits(),
            from: from.trim().to_lowercase(),
            to: to.trim().to_lowercase(),
            precision,
            rounding: RoundingMode::default(),
            generation: 0,
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Tie the entry to one registry snapshot; see [`UnitRegistry::generation`](measura_core::UnitRegistry::generation)
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.value_bits)
    }

    pub fn from_unit(&self) -> &str {
        &self.from
    }

    pub fn to_unit(&self) -> &str {
        &self.to
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: f64,
    created: Instant,
}

/// Cache diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub ttl: Duration,
    pub oldest_age: Option<Duration>,
    pub newest_age: Option<Duration>,
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes conversion results
#[derive(Debug)]
pub struct ConversionCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    max_size: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ConversionCache {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(max_size.min(1024))),
            max_size,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.ttl())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached result, if present and younger than the TTL.
    /// An expired entry is removed by this call.
    pub fn get(&self, key: &CacheKey) -> Option<f64> {
        let mut entries = self.lock();
        let state = entries
            .get(key)
            .map(|e| (e.value, e.created.elapsed() > self.ttl));
        let found = match state {
            Some((_, true)) => {
                entries.remove(key);
                tracing::trace!("Expired cache entry {:?}", key);
                None
            }
            Some((value, false)) => Some(value),
            None => None,
        };
        drop(entries);

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Insert, evicting the oldest-created entry when at capacity
    pub fn put(&self, key: CacheKey, value: f64) {
        if self.max_size == 0 {
            return;
        }
        let mut entries = self.lock();
        if !entries.contains_key(&key) {
            while entries.len() >= self.max_size {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.created)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(k) => {
                        entries.remove(&k);
                        tracing::trace!("Evicted cache entry {:?}", k);
                    }
                    None => break,
                }
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                created: Instant::now(),
            },
        );
    }

    /// Read-through lookup. On a miss `compute` runs once, outside the
    /// lock, and a successful result is stored. Errors are not cached.
    pub fn get_or_compute<F, E>(&self, key: CacheKey, compute: F) -> Result<f64, E>
    where
        F: FnOnce() -> Result<f64, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.put(key, value);
        Ok(value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, e| e.created.elapsed() <= ttl);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let ages = entries.values().map(|e| e.created.elapsed());
        let (oldest_age, newest_age) = ages.fold((None, None), |(oldest, newest): (Option<Duration>, Option<Duration>), age| {
            (
                Some(oldest.map_or(age, |o| o.max(age))),
                Some(newest.map_or(age, |n| n.min(age))),
            )
        });

        CacheStats {
            size: entries.len(),
            max_size: self.max_size,
            ttl: self.ttl,
            oldest_age,
            newest_age,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
