//! Wire types for the message service.
//!
//! The service is loosely typed: every record field is optional and may come
//! back as a number, a string, or not at all. We keep the raw JSON values here
//! and leave the interpretation to `core::message`.

use serde::Deserialize;
use serde_json::Value;

/// Successful response body: `{"data": [ ... ]}`.
#[derive(Deserialize, Debug)]
pub struct FeedResponse {
    pub data: Vec<Value>,
}

/// One raw message record as the service sends it.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct WireRecord {
    pub id: Option<Value>,
    pub message: Option<Value>,
    pub text: Option<Value>,
    pub title: Option<Value>,
    pub timestamp: Option<Value>,
}

impl WireRecord {
    /// Reads a record out of an arbitrary JSON value.
    /// Anything that isn't an object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

impl FeedResponse {
    pub fn into_records(self) -> Vec<WireRecord> {
        self.data.into_iter().map(WireRecord::from_value).collect()
    }
}
