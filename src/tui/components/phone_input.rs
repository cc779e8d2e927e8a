//! # PhoneInput Component
//!
//! Single-line field holding the phone number being looked up.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete, cursor movement)
//! - Report every edit to the parent, no debouncing
//! - Report refresh requests (Enter)
//! - Keep the cursor visible by scrolling horizontally
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The palette is a prop synced
//! from the app theme each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const PLACEHOLDER: &str = "e.g., 1234567890";

/// High-level events emitted by the PhoneInput
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneEvent {
    /// Buffer content changed; carries the full raw value.
    Changed(String),
    /// Operator asked to reload the current number (Enter).
    Refresh,
}

pub struct PhoneInput {
    buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Palette (Prop)
    pub palette: Palette,
}

impl PhoneInput {
    pub fn new(initial: &str, palette: Palette) -> Self {
        let buffer = single_line(initial);
        Self {
            cursor: buffer.len(),
            buffer,
            palette,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    fn insert(&mut self, text: &str) -> Option<PhoneEvent> {
        let text = single_line(text);
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
        Some(PhoneEvent::Changed(self.buffer.clone()))
    }

    /// Display column of the cursor.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }
}

/// Drops line breaks and other control characters.
fn single_line(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for PhoneInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.accent))
            .title("Phone Number:");
        let inner = block.inner(area);

        // Scroll so the cursor stays inside the box
        let column = self.cursor_column();
        let scroll = column.saturating_sub(inner.width.saturating_sub(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(Span::styled(PLACEHOLDER, self.palette.muted()))
        } else {
            Paragraph::new(self.buffer.as_str())
                .style(Style::default().fg(self.palette.text))
                .scroll((0, scroll))
        };
        frame.render_widget(paragraph.block(block), area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + column - scroll, inner.y));
        }
    }
}

impl EventHandler for PhoneInput {
    type Event = PhoneEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(PhoneEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(PhoneEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::ClearInput => {
                if self.buffer.is_empty() {
                    return None;
                }
                self.buffer.clear();
                self.cursor = 0;
                Some(PhoneEvent::Changed(String::new()))
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Refresh => Some(PhoneEvent::Refresh),
            _ => None,
        }
    }
}
