//! # Message Panel
//!
//! Renders the viewer for the current phone number. What it shows is a pure
//! function of the app's `ViewState` and phone:
//!
//! ```text
//! phone blank  → welcome panel
//! Loading      → spinner + "Loading messages for {phone}..."
//! Error        → banner (phone, endpoint, detail, retry hint) + fallback bubble
//! Loaded       → message bubbles, in order
//! ```
//!
//! `MessagePanel` is a transient component (created each frame) wrapping
//! `&mut ViewerState` (scroll position, persisted in `TuiState`) and `&App`
//! (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::Message;
use crate::core::state::{App, ViewState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{Bubble, Welcome};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const HEADER_HEIGHT: u16 = 3;
/// Rows kept below the error banner for the fallback bubble.
const FALLBACK_ROWS: u16 = 4;

pub const ERROR_TITLE: &str = "⚠ Failed to load messages from API";

/// Scroll state of the message list. Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct ViewerState {
    pub scroll_state: ScrollViewState,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, used whenever a new lookup starts.
    pub fn reset_scroll(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for ViewerState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct MessagePanel<'a> {
    pub app: &'a App,
    pub state: &'a mut ViewerState,
    pub palette: Palette,
    pub spinner_frame: usize,
}

impl<'a> MessagePanel<'a> {
    pub fn new(
        app: &'a App,
        state: &'a mut ViewerState,
        palette: Palette,
        spinner_frame: usize,
    ) -> Self {
        Self {
            app,
            state,
            palette,
            spinner_frame,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.palette.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [contact_area, action_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(inner);

        let avatar = Span::styled(
            " SA ",
            Style::default()
                .fg(self.palette.background)
                .bg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        );
        let contact = Line::from(vec![
            avatar,
            Span::raw(" "),
            Span::styled(
                format!("+{}", self.app.trimmed_phone()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let status = Line::from(Span::styled(
            format!("     {}", self.app.status_message),
            self.palette.muted(),
        ));
        frame.render_widget(Paragraph::new(vec![contact, status]), contact_area);

        // Refresh is disabled while loading or without a number
        let refresh_style = if self.app.can_refresh() {
            Style::default().fg(self.palette.accent)
        } else {
            self.palette.muted().add_modifier(Modifier::DIM)
        };
        let refresh = Paragraph::new(Span::styled("⟳ Enter", refresh_style))
            .alignment(Alignment::Right);
        frame.render_widget(refresh, action_area);
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let line = Line::from(vec![
            Span::styled(spinner, Style::default().fg(self.palette.accent)),
            Span::raw(format!(
                " Loading messages for {}...",
                self.app.trimmed_phone()
            )),
        ]);
        let [line_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), line_area);
    }

    /// Draws the error banner and returns the area left below it.
    fn render_error_banner(&self, frame: &mut Frame, area: Rect, detail: &str) -> Rect {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Phone: ", label),
                Span::raw(self.app.trimmed_phone()),
            ]),
            Line::from(vec![
                Span::styled("Endpoint: ", label),
                Span::raw(self.app.request_url()),
            ]),
            Line::from(vec![Span::styled("Error: ", label), Span::raw(detail)]),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Try Again",
                Style::default().fg(self.palette.accent),
            )),
        ];

        let banner = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.palette.error))
                    .title(Span::styled(
                        ERROR_TITLE,
                        Style::default()
                            .fg(self.palette.error)
                            .add_modifier(Modifier::BOLD),
                    )),
            )
            .wrap(Wrap { trim: false });

        let height = (banner.line_count(area.width.saturating_sub(2)) as u16)
            .min(area.height.saturating_sub(FALLBACK_ROWS));
        let [banner_area, rest] =
            Layout::vertical([Constraint::Length(height), Constraint::Min(0)]).areas(area);
        frame.render_widget(banner, banner_area);
        rest
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect, messages: &[Message]) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if messages.is_empty() {
            let empty = Paragraph::new(Span::styled(
                format!("No messages for {}", self.app.trimmed_phone()),
                self.palette.muted(),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        // Leave a column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let placements: Vec<(u16, u16)> = messages
            .iter()
            .map(|m| {
                let width = Bubble::layout_width(m, content_width);
                (width, Bubble::calculate_height(m, width))
            })
            .collect();
        let total_height: u16 = placements.iter().map(|(_, h)| h).sum();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, (width, height)) in messages.iter().zip(placements) {
            let x = if message.is_outgoing {
                content_width.saturating_sub(width)
            } else {
                0
            };
            let bubble = Bubble::new(message, self.palette);
            scroll_view.render_widget(bubble, Rect::new(x, y_offset, width, height));
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl<'a> Component for MessagePanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
                .areas(area);
        self.render_header(frame, header_area);

        let app = self.app;
        if !app.has_phone() {
            Welcome {
                palette: self.palette,
            }
            .render(frame, body_area);
            return;
        }

        match &app.view {
            ViewState::Idle => Welcome {
                palette: self.palette,
            }
            .render(frame, body_area),
            ViewState::Loading => self.render_loading(frame, body_area),
            ViewState::Error { detail, .. } => {
                let rest = self.render_error_banner(frame, body_area, detail);
                self.render_messages(frame, rest, app.view.messages());
            }
            ViewState::Loaded(messages) => self.render_messages(frame, body_area, messages),
        }
    }
}
