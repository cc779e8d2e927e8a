//! HTTP message source backed by `reqwest`.
//!
//! One GET per lookup:
//!
//! ```text
//! GET {endpoint}?phone={percent-encoded trimmed phone}
//! Content-Type: application/json
//! Accept: application/json
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::source::{FetchError, MessageSource};
use super::types::{FeedResponse, WireRecord};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5555/users/wp-messages";

/// Builds the lookup URL for `phone`. The phone is trimmed and percent-encoded.
pub fn phone_query_url(endpoint: &str, phone: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}phone={}",
        urlencoding::encode(phone.trim())
    )
}

/// Message source talking to the admin users service.
pub struct HttpMessageSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpMessageSource {
    /// Creates a new source.
    ///
    /// # Arguments
    /// * `endpoint` - Base URL without the `phone` query
    /// * `timeout` - Optional per-request timeout (none by default)
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client ({e}), falling back to defaults");
            reqwest::Client::new()
        });
        Self { endpoint, client }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    fn name(&self) -> &str {
        "http"
    }

    fn request_url(&self, phone: &str) -> String {
        phone_query_url(&self.endpoint, phone)
    }

    async fn fetch_records(&self, phone: &str) -> Result<Vec<WireRecord>, FetchError> {
        if phone.trim().is_empty() {
            return Err(FetchError::missing_phone());
        }

        let url = self.request_url(phone);
        info!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Message service returned {status} for {url}");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let feed: FeedResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!("Received {} records", feed.data.len());
        Ok(feed.into_records())
    }
}
