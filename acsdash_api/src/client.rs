//! HTTP client for the Census ACS data API.

use std::time::Duration;

use url::Url;

use crate::{query::AcsQuery, table::RawTable, Error};

/// Production endpoint: 2022 ACS 5-year estimates.
pub const DEFAULT_BASE_URL: &str = "https://api.census.gov/data/2022/acs/acs5";

/// HTTP client for the ACS data endpoint.
///
/// Each request builds a fresh `reqwest::Client` with the caller's timeout;
/// the timeout cancels the in-flight request on expiry.
pub struct Client {
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production ACS endpoint.
    pub fn new() -> Self {
        Self {
            base_api_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with
    /// wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    fn get_url(&self, query: &AcsQuery) -> Result<Url, Error> {
        let url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    /// Issues one GET and validates the tabular response shape.
    ///
    /// `timeout` bounds the whole request; expiry yields [`Error::Timeout`]
    /// and never partially-parsed data.
    pub async fn get_table(&self, query: &AcsQuery, timeout: Duration) -> Result<RawTable, Error> {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("Request timed out after {:?}", timeout);
                    Error::Timeout
                } else {
                    tracing::error!("Failed to get resource: {}", e);
                    Error::RequestFailed
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                tracing::error!("Failed to read response body: {}", e);
                Error::RequestFailed
            }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        RawTable::parse(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            e
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
