//! # Actions
//!
//! Everything that can happen in the dashboard becomes an `Action`.
//! Operator types a digit? That's `Action::PhoneChanged(text)`.
//! The service answers? That's `Action::FetchSucceeded { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Viewer state machine
//!
//! ```text
//!             phone set              ok
//!   Idle ─────────────────▶ Loading ─────▶ Loaded
//!    ▲                        │  ▲            │
//!    │ phone cleared    fail  │  │ refresh /  │
//!    └──────── (any) ◀──      ▼  │ new phone  │
//!                            Error ───────────┘
//! ```
//!
//! Every lookup gets a fresh sequence number. Completions carrying an older
//! number are dropped, so a slow answer for a previous phone can never
//! overwrite the current one.

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::message::{Message, transform};
use crate::core::state::{App, IDLE_STATUS, Theme, ViewState, normalize_phone};
use crate::remote::{FetchError, MessageSource, WireRecord};

#[derive(Debug)]
pub enum Action {
    /// The phone input changed (raw text, untrimmed).
    PhoneChanged(String),
    /// Operator asked for a reload of the current phone.
    Refresh,
    FetchSucceeded {
        seq: u64,
        records: Vec<WireRecord>,
        received_at: DateTime<Local>,
    },
    FetchFailed {
        seq: u64,
        error: FetchError,
        failed_at: DateTime<Local>,
    },
    ToggleTheme,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start lookup number `seq` for the (trimmed) phone.
    SpawnFetch { seq: u64, phone: String },
    /// Write the theme flag to the preferences store.
    PersistTheme(Theme),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::PhoneChanged(raw) => {
            app.phone = raw;
            match normalize_phone(&app.phone).map(str::to_owned) {
                None => {
                    clear_view(app);
                    Effect::None
                }
                // Same number as what's already on screen (or in flight)
                Some(phone) if app.active_phone.as_deref() == Some(phone.as_str()) => Effect::None,
                Some(phone) => start_fetch(app, phone),
            }
        }
        Action::Refresh => {
            if app.view.is_loading() {
                debug!("Refresh ignored: lookup #{} still in flight", app.fetch_seq);
                return Effect::None;
            }
            match normalize_phone(&app.phone).map(str::to_owned) {
                Some(phone) => start_fetch(app, phone),
                None => {
                    app.status_message = FetchError::missing_phone().to_string();
                    Effect::None
                }
            }
        }
        Action::FetchSucceeded {
            seq,
            records,
            received_at,
        } => {
            if seq != app.fetch_seq {
                debug!("Discarding stale response #{seq} (latest #{})", app.fetch_seq);
                return Effect::None;
            }
            let messages = transform(&records, received_at);
            info!(
                "Lookup #{seq} loaded {} of {} records",
                messages.len(),
                records.len()
            );
            app.status_message = format!("Connected: {}", app.trimmed_phone());
            app.view = ViewState::Loaded(messages);
            Effect::None
        }
        Action::FetchFailed {
            seq,
            error,
            failed_at,
        } => {
            if seq != app.fetch_seq {
                debug!("Discarding stale failure #{seq}: {error}");
                return Effect::None;
            }
            warn!("Lookup #{seq} failed: {error}");
            app.status_message = "Offline".to_string();
            app.view = ViewState::Error {
                detail: error.to_string(),
                fallback: Message::fallback(failed_at),
            };
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            info!("Theme switched to {}", app.theme.attribute());
            Effect::PersistTheme(app.theme)
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_fetch(app: &mut App, phone: String) -> Effect {
    app.fetch_seq += 1;
    app.status_message = "Loading...".to_string();
    app.view = ViewState::Loading;
    app.active_phone = Some(phone.clone());
    Effect::SpawnFetch {
        seq: app.fetch_seq,
        phone,
    }
}

fn clear_view(app: &mut App) {
    if app.active_phone.is_some() {
        // Orphan whatever is still in flight
        app.fetch_seq += 1;
    }
    app.active_phone = None;
    app.view = ViewState::Idle;
    app.status_message = IDLE_STATUS.to_string();
}

/// Runs lookup `seq` against `source` and turns the outcome into the action
/// that reports it back to `update()`.
pub async fn perform_fetch(source: &dyn MessageSource, seq: u64, phone: &str) -> Action {
    match source.fetch_records(phone).await {
        Ok(records) => Action::FetchSucceeded {
            seq,
            records,
            received_at: Local::now(),
        },
        Err(error) => Action::FetchFailed {
            seq,
            error,
            failed_at: Local::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{FALLBACK_TEXT, MAX_MESSAGES, MessageStatus, PLACEHOLDER_TEXT};
    use crate::test_support::{StubSource, test_app, test_app_with};
    use serde_json::json;
    use std::sync::Arc;

    fn records(values: Vec<serde_json::Value>) -> Vec<WireRecord> {
        values.into_iter().map(WireRecord::from_value).collect()
    }

    fn succeed(app: &mut App, seq: u64, values: Vec<serde_json::Value>) -> Effect {
        update(
            app,
            Action::FetchSucceeded {
                seq,
                records: records(values),
                received_at: Local::now(),
            },
        )
    }

    fn fail(app: &mut App, seq: u64, error: FetchError) -> Effect {
        update(
            app,
            Action::FetchFailed {
                seq,
                error,
                failed_at: Local::now(),
            },
        )
    }

    #[test]
    fn blank_phone_stays_idle_without_fetching() {
        for raw in ["", " ", "\t", "   \n  "] {
            let mut app = test_app();
            let effect = update(&mut app, Action::PhoneChanged(raw.to_string()));
            assert_eq!(effect, Effect::None, "input {raw:?}");
            assert_eq!(app.view, ViewState::Idle);
            assert_eq!(app.fetch_seq, 0);
        }
    }

    #[test]
    fn non_empty_phone_spawns_one_trimmed_fetch() {
        let mut app = test_app();
        let effect = update(&mut app, Action::PhoneChanged(" 5551234 ".to_string()));
        assert_eq!(
            effect,
            Effect::SpawnFetch {
                seq: 1,
                phone: "5551234".to_string()
            }
        );
        assert_eq!(app.view, ViewState::Loading);
        assert_eq!(app.phone, " 5551234 ");
    }

    #[test]
    fn refresh_is_suppressed_while_loading() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
        assert_eq!(app.fetch_seq, 1);
    }

    #[test]
    fn refresh_after_completion_refetches_same_phone() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        succeed(&mut app, 1, vec![json!({"message": "hi"})]);

        let effect = update(&mut app, Action::Refresh);
        assert_eq!(
            effect,
            Effect::SpawnFetch {
                seq: 2,
                phone: "5551234".to_string()
            }
        );
        assert_eq!(app.view, ViewState::Loading);
    }

    #[test]
    fn refresh_without_phone_reports_validation_error() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
        assert_eq!(app.view, ViewState::Idle);
        assert_eq!(app.status_message, FetchError::missing_phone().to_string());
    }

    #[test]
    fn unchanged_trimmed_phone_does_not_refetch() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        succeed(&mut app, 1, vec![json!({"message": "hi"})]);

        let effect = update(&mut app, Action::PhoneChanged("5551234 ".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(matches!(app.view, ViewState::Loaded(_)));
    }

    #[test]
    fn new_phone_while_loading_starts_new_fetch() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("555".to_string()));
        let effect = update(&mut app, Action::PhoneChanged("5551".to_string()));
        assert_eq!(
            effect,
            Effect::SpawnFetch {
                seq: 2,
                phone: "5551".to_string()
            }
        );
    }

    #[test]
    fn clearing_phone_resets_to_idle_from_any_state() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        fail(&mut app, 1, FetchError::Network("refused".to_string()));
        assert!(matches!(app.view, ViewState::Error { .. }));

        update(&mut app, Action::PhoneChanged("   ".to_string()));
        assert_eq!(app.view, ViewState::Idle);
        assert!(app.view.messages().is_empty());
        assert_eq!(app.status_message, IDLE_STATUS);
    }

    #[test]
    fn success_loads_capped_read_messages() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        let values = (0..8).map(|i| json!({"id": i + 1, "text": format!("t{i}")})).collect();
        succeed(&mut app, 1, values);

        let ViewState::Loaded(messages) = &app.view else {
            panic!("expected Loaded, got {:?}", app.view);
        };
        assert_eq!(messages.len(), MAX_MESSAGES);
        assert_eq!(messages[0].text, "t0");
        assert_eq!(messages[5].text, "t5");
        assert!(messages.iter().all(|m| !m.is_outgoing && m.status == MessageStatus::Read));
        assert_eq!(app.status_message, "Connected: 5551234");
    }

    #[test]
    fn record_without_content_gets_placeholder() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        succeed(&mut app, 1, vec![json!({"id": 9, "timestamp": 1700000000000_i64})]);
        assert_eq!(app.view.messages()[0].text, PLACEHOLDER_TEXT);
    }

    #[test]
    fn failure_shows_error_and_single_fallback() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        fail(&mut app, 1, FetchError::Network("connection refused".to_string()));

        let detail = app.view.error_detail().expect("error state");
        assert!(!detail.is_empty());
        let messages = app.view.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, FALLBACK_TEXT);
        assert_eq!(app.status_message, "Offline");
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("111".to_string()));
        update(&mut app, Action::PhoneChanged("222".to_string()));

        succeed(&mut app, 1, vec![json!({"message": "old"})]);
        assert_eq!(app.view, ViewState::Loading);
        fail(&mut app, 1, FetchError::Status { status: 500 });
        assert_eq!(app.view, ViewState::Loading);

        succeed(&mut app, 2, vec![json!({"message": "new"})]);
        assert_eq!(app.view.messages()[0].text, "new");
    }

    #[test]
    fn late_response_after_clearing_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("111".to_string()));
        update(&mut app, Action::PhoneChanged(String::new()));
        succeed(&mut app, 1, vec![json!({"message": "late"})]);
        assert_eq!(app.view, ViewState::Idle);
    }

    #[test]
    fn toggling_theme_twice_restores_it() {
        let mut app = test_app();
        let original = app.theme;

        assert_eq!(
            update(&mut app, Action::ToggleTheme),
            Effect::PersistTheme(original.toggled())
        );
        assert_eq!(app.theme.attribute(), "light");
        assert_eq!(update(&mut app, Action::ToggleTheme), Effect::PersistTheme(original));
        assert_eq!(app.theme, original);
        assert_eq!(app.theme.attribute(), "dark");
    }

    #[test]
    fn theme_toggle_leaves_messages_alone() {
        let mut app = test_app();
        update(&mut app, Action::PhoneChanged("5551234".to_string()));
        succeed(&mut app, 1, vec![json!({"message": "hi"})]);
        let before = app.view.clone();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.view, before);
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[tokio::test]
    async fn perform_fetch_reports_failure_for_current_seq() {
        let source = Arc::new(StubSource::failing(FetchError::Network("unreachable".to_string())));
        let mut app = test_app_with(source.clone());

        let Effect::SpawnFetch { seq, phone } =
            update(&mut app, Action::PhoneChanged("5551234".to_string()))
        else {
            panic!("expected a fetch");
        };
        let action = perform_fetch(source.as_ref(), seq, &phone).await;
        update(&mut app, action);

        assert_eq!(source.calls(), vec!["5551234".to_string()]);
        assert!(app.view.error_detail().is_some_and(|d| d.contains("unreachable")));
        assert_eq!(app.view.messages().len(), 1);
    }

    #[tokio::test]
    async fn perform_fetch_reports_records() {
        let source = Arc::new(StubSource::returning(records(vec![
            json!({"id": 1, "message": "hi"}),
        ])));
        let mut app = test_app_with(source.clone());
        update(&mut app, Action::PhoneChanged("15550001234".to_string()));

        let action = perform_fetch(source.as_ref(), app.fetch_seq, "15550001234").await;
        update(&mut app, action);

        assert_eq!(app.view.messages()[0].text, "hi");
    }
}
