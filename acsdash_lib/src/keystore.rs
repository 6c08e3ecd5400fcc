//! API key resolution and persistence.
//!
//! The key is the only state that survives a session. Storage sits behind
//! the [`KeyStore`] capability so the pipeline never assumes a backend;
//! the CLI uses a JSON file, tests use the in-memory store.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use acsdash_api::{AcsQuery, Client, Geography};

use crate::Error;

/// Environment variable checked before any stored key.
pub const ENV_KEY: &str = "CENSUS_API_KEY";

/// Timeout for the validation probe request.
const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimal persistence capability for the single key scalar.
pub trait KeyStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, key: &str) -> Result<(), Error>;
    fn remove(&self) -> Result<(), Error>;
}

#[derive(Serialize, Deserialize)]
struct StoredKey {
    api_key: String,
}

/// Key store backed by a single JSON file.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredKey>(&contents) {
            Ok(stored) if !stored.api_key.is_empty() => Some(stored.api_key),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable key file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::KeyStore(format!("creating {}: {}", parent.display(), e)))?;
        }
        let contents = serde_json::to_string(&StoredKey {
            api_key: key.to_string(),
        })?;
        std::fs::write(&self.path, contents)
            .map_err(|e| Error::KeyStore(format!("writing {}: {}", self.path.display(), e)))
    }

    fn remove(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::KeyStore(format!(
                "removing {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self) -> Option<String> {
        self.key.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, key: &str) -> Result<(), Error> {
        *self.key.lock().unwrap_or_else(|e| e.into_inner()) = Some(key.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), Error> {
        *self.key.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Resolves the API key used by every fetcher.
///
/// Priority: the environment key captured at construction, then the store.
/// A `None` resolution means "cannot perform network fetch"; callers fall
/// back to synthetic or backup data rather than failing.
pub struct CredentialResolver {
    env_key: Option<String>,
    store: Box<dyn KeyStore>,
}

impl CredentialResolver {
    /// Captures the environment key at construction.
    pub fn new(store: Box<dyn KeyStore>) -> Self {
        let env_key = std::env::var(ENV_KEY).ok().filter(|k| !k.is_empty());
        Self { env_key, store }
    }

    /// Injects the environment key explicitly. Used by tests to avoid
    /// depending on ambient process state.
    pub fn with_env_key(store: Box<dyn KeyStore>, env_key: Option<String>) -> Self {
        Self { env_key, store }
    }

    pub fn api_key(&self) -> Option<String> {
        self.env_key.clone().or_else(|| self.store.get())
    }

    /// Validates a key with one lightweight real request (state names for
    /// one state) and persists it on success.
    pub async fn validate_key(&self, client: &Client, key: &str) -> Result<(), Error> {
        let query = AcsQuery::new(Geography::State {
            state: "06".to_string(),
        })
        .with_api_key(key);
        client.get_table(&query, VALIDATE_TIMEOUT).await?;
        self.store.set(key)
    }

    /// Removes the persisted key. The environment key, if any, still wins
    /// on the next resolution.
    pub fn clear(&self) -> Result<(), Error> {
        self.store.remove()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "acsdash-keystore-{}-{}-{}.json",
            std::process::id(),
            name,
            n
        ))
    }

    #[test]
    fn file_store_round_trip() {
        let path = scratch_path("round-trip");
        let store = FileKeyStore::new(&path);
        assert_eq!(store.get(), None);
        store.set("abc123").unwrap();
        assert_eq!(store.get(), Some("abc123".to_string()));
        store.remove().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let path = scratch_path("remove-idempotent");
        let store = FileKeyStore::new(&path);
        store.remove().unwrap();
        store.remove().unwrap();
    }

    #[test]
    fn file_store_ignores_garbage_contents() {
        let path = scratch_path("garbage");
        std::fs::write(&path, "not json at all").unwrap();
        let store = FileKeyStore::new(&path);
        assert_eq!(store.get(), None);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn env_key_wins_over_store() {
        let store = MemoryKeyStore::with_key("stored");
        let resolver =
            CredentialResolver::with_env_key(Box::new(store), Some("from-env".to_string()));
        assert_eq!(resolver.api_key(), Some("from-env".to_string()));
    }

    #[test]
    fn store_key_used_when_no_env() {
        let store = MemoryKeyStore::with_key("stored");
        let resolver = CredentialResolver::with_env_key(Box::new(store), None);
        assert_eq!(resolver.api_key(), Some("stored".to_string()));
    }

    #[test]
    fn resolves_none_when_empty() {
        let resolver = CredentialResolver::with_env_key(Box::new(MemoryKeyStore::new()), None);
        assert_eq!(resolver.api_key(), None);
    }

    #[test]
    fn clear_removes_stored_key() {
        let store = MemoryKeyStore::with_key("stored");
        let resolver = CredentialResolver::with_env_key(Box::new(store), None);
        resolver.clear().unwrap();
        assert_eq!(resolver.api_key(), None);
    }
}
