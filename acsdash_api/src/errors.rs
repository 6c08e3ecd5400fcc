//! Error types for the API client.

/// Errors that can occur when talking to the Census data API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed before a response was received (network error
    /// or client construction failure).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A 2xx response whose body does not match the documented tabular
    /// shape: not a JSON array, fewer than two rows, a ragged row, or a
    /// cell that is neither string, number, nor null.
    #[error("Malformed API response: {0}")]
    Format(String),
    /// The request exceeded its time bound.
    #[error("Request timed out")]
    Timeout,
}
