//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (lookup in flight): draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, completed lookups
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, perform_fetch, update};
use crate::core::config::ResolvedConfig;
use crate::core::preferences::Preferences;
use crate::core::state::{App, Theme};
use crate::remote::{HttpMessageSource, MessageSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{PhoneEvent, PhoneInput, ViewerState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub phone_input: PhoneInput,
    pub viewer: ViewerState,
}

impl TuiState {
    pub fn new(initial_phone: &str, theme: Theme) -> Self {
        Self {
            phone_input: PhoneInput::new(initial_phone, Palette::for_theme(theme)),
            viewer: ViewerState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Cursor sits in the phone input
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, mut preferences: Preferences) -> std::io::Result<()> {
    let http = HttpMessageSource::new(config.endpoint.clone(), config.timeout);
    info!(
        "Starting dashboard (endpoint={}, timeout={:?})",
        http.endpoint(),
        config.timeout
    );
    let source: Arc<dyn MessageSource> = Arc::new(http);
    let mut app = App::new(source, preferences.theme());
    let mut tui = TuiState::new(&config.initial_phone, app.theme);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // A pre-filled number is looked up straight away
    let initial_phone = tui.phone_input.value().to_string();
    if !initial_phone.trim().is_empty() {
        let effect = update(&mut app, Action::PhoneChanged(initial_phone));
        apply_effect(effect, &app, &mut tui, &mut preferences, &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync PhoneInput props with App state
        tui.phone_input.palette = Palette::for_theme(app.theme);

        let animating = app.view.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => continue,
                TuiEvent::Quit => Action::Quit,
                TuiEvent::ToggleTheme => Action::ToggleTheme,
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.viewer.handle_event(&event);
                    continue;
                }
                _ => match tui.phone_input.handle_event(&event) {
                    Some(PhoneEvent::Changed(value)) => Action::PhoneChanged(value),
                    Some(PhoneEvent::Refresh) => Action::Refresh,
                    None => continue,
                },
            };

            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &mut preferences, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Completed lookups from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &app, &mut tui, &mut preferences, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Carries out an effect returned by `update()`. Returns true when the
/// dashboard should exit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    preferences: &mut Preferences,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnFetch { seq, phone } => {
            tui.viewer.reset_scroll();
            spawn_fetch(app.source.clone(), seq, phone, tx.clone());
            false
        }
        Effect::PersistTheme(theme) => {
            preferences.set_theme(theme);
            if let Err(e) = preferences.save() {
                warn!("Failed to save theme preference: {}", e);
            }
            false
        }
    }
}

fn spawn_fetch(
    source: Arc<dyn MessageSource>,
    seq: u64,
    phone: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning lookup #{} via {} for {}", seq, source.name(), phone);
    tokio::spawn(async move {
        let action = perform_fetch(source.as_ref(), seq, &phone).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver lookup #{}: receiver dropped", seq);
        }
    });
}
