//! # Application State
//!
//! Core state for the dashboard. Domain logic only, no TUI types.
//!
//! ```text
//! App
//! ├── source: Arc<dyn MessageSource>  // where lookups go
//! ├── phone: String                   // raw input, exactly as typed
//! ├── theme: Theme                    // dark / light marker
//! ├── view: ViewState                 // Idle | Loading | Error | Loaded
//! ├── status_message: String          // status line text
//! ├── fetch_seq: u64                  // id of the latest lookup
//! └── active_phone: Option<String>    // trimmed phone the view belongs to
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::message::Message;
use crate::remote::MessageSource;

pub const IDLE_STATUS: &str = "No phone number";

/// Returns the trimmed phone number, or `None` when it is blank.
pub fn normalize_phone(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// What the message panel is showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    /// The lookup failed. `fallback` is shown as a bubble next to the banner.
    Error { detail: String, fallback: Message },
    Loaded(Vec<Message>),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Bubbles to render for this state.
    pub fn messages(&self) -> &[Message] {
        match self {
            ViewState::Error { fallback, .. } => std::slice::from_ref(fallback),
            ViewState::Loaded(messages) => messages,
            ViewState::Idle | ViewState::Loading => &[],
        }
    }

    pub fn error_detail(&self) -> Option<&str> {
        match self {
            ViewState::Error { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Presentation marker mirroring the flag.
    pub fn attribute(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

pub struct App {
    pub source: Arc<dyn MessageSource>,
    pub phone: String,
    pub theme: Theme,
    pub view: ViewState,
    pub status_message: String,
    pub fetch_seq: u64,
    pub active_phone: Option<String>,
}

impl App {
    pub fn new(source: Arc<dyn MessageSource>, theme: Theme) -> Self {
        Self {
            source,
            phone: String::new(),
            theme,
            view: ViewState::Idle,
            status_message: IDLE_STATUS.to_string(),
            fetch_seq: 0,
            active_phone: None,
        }
    }

    pub fn trimmed_phone(&self) -> &str {
        self.phone.trim()
    }

    pub fn has_phone(&self) -> bool {
        normalize_phone(&self.phone).is_some()
    }

    /// Refresh is offered only with a phone number and no lookup in flight.
    pub fn can_refresh(&self) -> bool {
        self.has_phone() && !self.view.is_loading()
    }

    /// The lookup URL for the current phone, as shown in the error banner.
    pub fn request_url(&self) -> String {
        self.source.request_url(&self.phone)
    }
}
