use std::fmt;

use async_trait::async_trait;

use super::types::WireRecord;

/// Shown when a lookup is attempted without a phone number.
pub const MISSING_PHONE_MESSAGE: &str = "Please enter a phone number in the left panel";

/// Everything that can go wrong while fetching messages for a phone number.
/// None of these are fatal: the viewer surfaces them and waits for a retry.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No usable phone number at the time of a manual fetch.
    Validation(String),
    /// The request never completed (DNS, connection refused, timeout).
    Network(String),
    /// The service answered with a non-2xx status.
    Status { status: u16 },
    /// The body was not JSON or had no `data` array.
    Parse(String),
}

impl FetchError {
    pub fn missing_phone() -> Self {
        FetchError::Validation(MISSING_PHONE_MESSAGE.to_string())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Validation(msg) => write!(f, "{msg}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status } => write!(f, "HTTP error! status: {status}"),
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can look up recent messages for a phone number.
///
/// The HTTP implementation lives in [`super::http`]; tests swap in a stub.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// The full URL a lookup for `phone` is sent to, query included.
    fn request_url(&self, phone: &str) -> String;

    /// Fetches the raw records for `phone`. The caller decides how many to keep.
    async fn fetch_records(&self, phone: &str) -> Result<Vec<WireRecord>, FetchError>;
}
