//! # Messages
//!
//! Display-ready messages and the mapping from raw service records.
//!
//! ```text
//! WireRecord ──from_record()──▶ Message
//!   id?          → id        (record id, else position)
//!   message?     → text      (first non-empty of message/text/title,
//!   text?                      else "No message content")
//!   title?
//!   timestamp?   → timestamp (HH:MM; synthesized when absent)
//! ```
//!
//! Fetched messages are always incoming and always `Read`; the viewer has no
//! way to send.

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::remote::WireRecord;

/// At most this many records are shown per lookup.
pub const MAX_MESSAGES: usize = 6;
/// Text for records that carry no usable content.
pub const PLACEHOLDER_TEXT: &str = "No message content";
/// Text of the single bubble shown when a lookup fails.
pub const FALLBACK_TEXT: &str = "Problem fetching messages";
/// Spacing between synthesized timestamps, newest first.
const SYNTHETIC_STEP_MINUTES: i64 = 2;

const CLOCK_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{n}"),
            MessageId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    /// Delivery glyph shown next to outgoing messages.
    pub fn glyph(self) -> &'static str {
        match self {
            MessageStatus::Sent => "✓",
            MessageStatus::Delivered | MessageStatus::Read => "✓✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    /// Already formatted for display (`HH:MM`).
    pub timestamp: String,
    pub is_outgoing: bool,
    pub status: MessageStatus,
}

impl Message {
    /// Maps one raw record at position `index` into a display message.
    pub fn from_record(record: &WireRecord, index: usize, now: DateTime<Local>) -> Self {
        let sent_at = record
            .timestamp
            .as_ref()
            .and_then(parse_timestamp)
            .unwrap_or_else(|| synthetic_time(now, index));

        Self {
            id: resolve_id(record.id.as_ref(), index),
            text: resolve_text(record),
            timestamp: format_clock(sent_at),
            is_outgoing: false,
            status: MessageStatus::Read,
        }
    }

    /// The stand-in bubble for a failed lookup.
    pub fn fallback(at: DateTime<Local>) -> Self {
        Self {
            id: MessageId::Number(1),
            text: FALLBACK_TEXT.to_string(),
            timestamp: format_clock(at),
            is_outgoing: false,
            status: MessageStatus::Read,
        }
    }
}

/// Maps the first [`MAX_MESSAGES`] records, preserving order.
pub fn transform(records: &[WireRecord], now: DateTime<Local>) -> Vec<Message> {
    records
        .iter()
        .take(MAX_MESSAGES)
        .enumerate()
        .map(|(index, record)| Message::from_record(record, index, now))
        .collect()
}

pub fn format_clock(at: DateTime<Local>) -> String {
    at.format(CLOCK_FORMAT).to_string()
}

/// Zero and empty ids count as missing.
fn resolve_id(raw: Option<&Value>, index: usize) -> MessageId {
    match raw {
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n
            .as_i64()
            .map(MessageId::Number)
            .unwrap_or_else(|| MessageId::Text(n.to_string())),
        Some(Value::String(s)) if !s.is_empty() => MessageId::Text(s.clone()),
        _ => MessageId::Number(index as i64),
    }
}

fn resolve_text(record: &WireRecord) -> String {
    [&record.message, &record.text, &record.title]
        .into_iter()
        .flatten()
        .find_map(display_text)
        .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string())
}

/// Text shown for a content field. Empty strings, zero, `false` and `null`
/// count as absent.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn synthetic_time(now: DateTime<Local>, index: usize) -> DateTime<Local> {
    now - Duration::minutes(index as i64 * SYNTHETIC_STEP_MINUTES)
}

/// Reads a record timestamp: epoch milliseconds or a date/time string.
/// Zero, empty and unparseable values yield `None`.
pub fn parse_timestamp(raw: &Value) -> Option<DateTime<Local>> {
    match raw {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            if millis == 0 {
                return None;
            }
            Local.timestamp_millis_opt(millis).single()
        }
        Value::String(s) if !s.trim().is_empty() => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local));
    }

    // Zone-less date-times are local wall-clock times
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    // Bare dates are midnight UTC
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}
