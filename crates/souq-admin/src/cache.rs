//! Cache for slowly changing reference data.
//!
//! Cities, categories and category features are fetched once and kept for
//! a long time. Entries are stored as JSON strings in a [`KeyValueStore`],
//! each stamped with the time it was written.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Default lifetime of a cached entry, in days.
pub const DEFAULT_REFERENCE_TTL_DAYS: i64 = 30;

/// Source of the current time.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// String storage behind the cache.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: String);

    /// Removes `key`.
    fn remove(&self, key: &str);
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Whether the store holds no key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Store keeping one file per key in a directory.
///
/// Keys become file names with a `.json` suffix. Only ASCII letters,
/// digits, `-`, `_` and `.` are accepted, and a key may not start with a
/// dot. Any other key is ignored with a warning: reads miss and writes are
/// dropped.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Io`] when the directory cannot be
    /// created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the file of `key`, or `None` when the key is not a plain
    /// file name inside the store directory.
    fn path(&self, key: &str) -> Option<PathBuf> {
        let plain = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !plain {
            warn!(key = %key, "ignoring cache key that is not a plain file name");
            return None;
        }
        Some(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)?).ok()
    }

    fn set(&self, key: &str, value: String) {
        let Some(path) = self.path(key) else {
            return;
        };
        if let Err(e) = fs::write(path, value) {
            warn!(key = %key, error = %e, "failed to write cache file");
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.path(key) else {
            return;
        };
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(key = %key, error = %e, "failed to remove cache file");
            }
        }
    }
}

/// A stored value with its write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Cached value.
    pub value: T,
    /// When the value was written.
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is older than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.stored_at >= ttl
    }
}

/// Time-limited cache over a [`KeyValueStore`].
#[derive(Debug)]
pub struct ReferenceCache<S, C = SystemClock> {
    store: S,
    clock: C,
    ttl: Duration,
}

impl<S: KeyValueStore> ReferenceCache<S, SystemClock> {
    /// Creates a cache using the system clock and the default lifetime.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ReferenceCache<S, C> {
    /// Creates a cache with a custom clock.
    #[must_use]
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            ttl: Duration::days(DEFAULT_REFERENCE_TTL_DAYS),
        }
    }

    /// Sets the entry lifetime.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the fresh value under `key`.
    ///
    /// Expired and unreadable entries are removed and reported as missing.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "dropping unreadable cache entry");
                self.store.remove(key);
                return None;
            }
        };

        if entry.is_expired(self.clock.now(), self.ttl) {
            debug!(key = %key, stored_at = %entry.stored_at, "cache entry expired");
            self.store.remove(key);
            return None;
        }

        debug!(key = %key, "cache hit");
        Some(entry.value)
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AdminError::Json`] when `value` cannot be
    /// serialized.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.store.set(key, serde_json::to_string(&entry)?);
        debug!(key = %key, "cache entry stored");
        Ok(())
    }

    /// Returns the cached value, or fetches and stores it.
    ///
    /// A failed fetch leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns the error of `fetch`, or a serialization error while
    /// storing the fetched value.
    pub fn get_or_fetch<T, F>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        debug!(key = %key, "cache miss, fetching");
        let value = fetch()?;
        self.put(key, &value)?;
        Ok(value)
    }

    /// Removes `key`.
    pub fn invalidate(&self, key: &str) {
        self.store.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use crate::models::City;
    use chrono::TimeZone;
    use std::cell::Cell;

    struct ManualClock {
        now: Cell<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }

    fn cities() -> Vec<City> {
        vec![
            City {
                id: 1,
                name: "Riyadh".to_string(),
                region: Some("Central".to_string()),
            },
            City {
                id: 2,
                name: "Jeddah".to_string(),
                region: None,
            },
        ]
    }

    #[test]
    fn test_put_and_get() {
        let clock = ManualClock::new();
        let cache = ReferenceCache::with_clock(MemoryStore::new(), &clock);

        cache.put("cities", &cities()).unwrap();
        let cached: Vec<City> = cache.get("cities").unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].name, "Riyadh");
        assert!(cache.get::<Vec<City>>("categories").is_none());
    }

    #[test]
    fn test_entries_expire() {
        let clock = ManualClock::new();
        let cache = ReferenceCache::with_clock(MemoryStore::new(), &clock);
        assert_eq!(cache.ttl(), Duration::days(30));

        cache.put("cities", &cities()).unwrap();
        clock.advance(Duration::days(29));
        assert!(cache.get::<Vec<City>>("cities").is_some());

        clock.advance(Duration::days(1));
        assert!(cache.get::<Vec<City>>("cities").is_none());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_get_or_fetch_fetches_once() {
        let clock = ManualClock::new();
        let cache =
            ReferenceCache::with_clock(MemoryStore::new(), &clock).with_ttl(Duration::hours(1));
        let calls = Cell::new(0);

        for _ in 0..3 {
            let value: Vec<City> = cache
                .get_or_fetch("cities", || {
                    calls.set(calls.get() + 1);
                    Ok(cities())
                })
                .unwrap();
            assert_eq!(value.len(), 2);
        }
        assert_eq!(calls.get(), 1);

        clock.advance(Duration::hours(2));
        let _: Vec<City> = cache
            .get_or_fetch("cities", || {
                calls.set(calls.get() + 1);
                Ok(cities())
            })
            .unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_failed_fetch_is_not_cached() {
        let cache = ReferenceCache::new(MemoryStore::new());
        let result: Result<Vec<City>> =
            cache.get_or_fetch("cities", || Err(AdminError::Api("offline".to_string())));
        assert!(result.is_err());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_unreadable_entry_is_dropped() {
        let store = MemoryStore::new();
        store.set("cities", "not json".to_string());
        let cache = ReferenceCache::new(store);

        assert!(cache.get::<Vec<City>>("cities").is_none());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_invalidate() {
        let cache = ReferenceCache::new(MemoryStore::new());
        cache.put("cities", &cities()).unwrap();
        cache.invalidate("cities");
        assert!(cache.get::<Vec<City>>("cities").is_none());
    }
}
