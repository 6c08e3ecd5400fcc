//! In-memory TTL cache for raw API tables, backed by `DashMap`.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use acsdash_api::RawTable;

/// A single cached table with its expiration time.
struct CacheEntry {
    table: RawTable,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Session-scoped only; nothing here survives the process. Expired entries
/// are lazily evicted on the next `get` call for that key.
pub struct ResponseCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached table for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<RawTable> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.table.clone())
    }

    /// Inserts or overwrites a cache entry. The entry expires after the
    /// configured TTL.
    pub fn set(&self, key: String, table: RawTable) {
        self.store.insert(
            key,
            CacheEntry {
                table,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}
