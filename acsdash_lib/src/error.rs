//! Error types for the library layer.

/// Errors produced by the pipeline layer, wrapping transport errors and
/// adding input validation, lookup, and key-store failures.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error from the underlying API client.
    #[error("API error: {0}")]
    Api(#[from] acsdash_api::Error),
    /// User-provided identifier failed validation (ZIP, state code, place
    /// code). Surfaced directly, never retried, never defaulted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A targeted lookup found no candidate.
    #[error("Not found: {0}")]
    NotFound(String),
    /// No API key resolved from the environment or the key store.
    #[error("No API key configured; set CENSUS_API_KEY or save a key")]
    MissingApiKey,
    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The key store could not be read or written.
    #[error("Key store error: {0}")]
    KeyStore(String),
}
