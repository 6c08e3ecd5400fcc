mod client;
mod errors;
mod query;
mod table;
pub mod variables;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{AcsQuery, Geography};
pub use self::table::RawTable;
