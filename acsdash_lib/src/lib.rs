//! Demographic concentration pipeline over the Census ACS API.
//!
//! Wraps the `acsdash_api` transport crate with credential resolution,
//! geographic unit lookup, concurrent per-unit enrichment, deterministic
//! synthetic substitution for failed sub-fetches, and a static backup
//! dataset for total failures.

pub mod backup;
pub mod cache;
pub mod client;
mod error;
pub mod filter;
pub mod geo;
pub mod keystore;
pub mod metrics;
pub mod normalize;
pub mod orchestrator;
pub mod synthetic;
pub mod types;

pub use acsdash_api;

pub use client::CachedClient;
pub use error::Error;
pub use filter::{apply_filters, FilterCriteria};
pub use geo::GeographicUnit;
pub use keystore::{CredentialResolver, FileKeyStore, KeyStore, MemoryKeyStore};
pub use normalize::PlaceProfile;
pub use orchestrator::Pipeline;
pub use types::{
    AgeDistribution, EducationDistribution, Ethnicity, IncomeDistribution, LocationRecord,
};
