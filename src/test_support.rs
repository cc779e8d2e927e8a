//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::{App, Theme};
use crate::remote::{FetchError, MessageSource, WireRecord, phone_query_url};

pub const STUB_ENDPOINT: &str = "http://stub.local/users/wp-messages";

/// A canned message source that records every phone it is asked for.
pub struct StubSource {
    outcome: Result<Vec<WireRecord>, FetchError>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn returning(records: Vec<WireRecord>) -> Self {
        Self {
            outcome: Ok(records),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn request_url(&self, phone: &str) -> String {
        phone_query_url(STUB_ENDPOINT, phone)
    }

    async fn fetch_records(&self, phone: &str) -> Result<Vec<WireRecord>, FetchError> {
        self.calls.lock().unwrap().push(phone.to_string());
        self.outcome.clone()
    }
}

/// Creates a test App backed by an empty StubSource.
pub fn test_app() -> App {
    test_app_with(Arc::new(StubSource::returning(Vec::new())))
}

pub fn test_app_with(source: Arc<dyn MessageSource>) -> App {
    App::new(source, Theme::Dark)
}
