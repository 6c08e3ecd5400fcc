//! Caching wrapper around the transport client.
//!
//! Cache hits bypass the network entirely. There is no retry logic
//! anywhere in the pipeline: a failed fetch resolves immediately to its
//! caller's fallback path (synthetic data or the backup dataset).

use std::time::Duration;

use acsdash_api::{AcsQuery, Client, RawTable};

use crate::cache::ResponseCache;
use crate::Error;

/// API client wrapper that adds in-memory response caching.
pub struct CachedClient {
    inner: Client,
    cache: ResponseCache,
}

impl CachedClient {
    /// Creates a new cached client using the production API URL.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            inner: Client::new(),
            cache,
        }
    }

    /// Creates a new cached client with a custom base URL. Used for
    /// testing.
    pub fn with_base_url(base_url: &str, cache: ResponseCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
        }
    }

    /// Fetches a table, returning the cached copy when available. Only
    /// successful responses are cached; the cache key excludes the API key.
    pub async fn get_table(&self, query: &AcsQuery, timeout: Duration) -> Result<RawTable, Error> {
        let cache_key = query.cache_key();
        if let Some(table) = self.cache.get(&cache_key) {
            tracing::debug!("cache hit for {}", cache_key);
            return Ok(table);
        }

        let table = self.inner.get_table(query, timeout).await?;
        self.cache.set(cache_key, table.clone());
        Ok(table)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
