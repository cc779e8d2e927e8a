use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Message, MessageStatus};
use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders, plus the timestamp line.
const VERTICAL_OVERHEAD: u16 = 2 + 1;
/// Bubbles never take more than this share of the list width.
const MAX_WIDTH_PERCENT: u16 = 80;
const MIN_WIDTH: u16 = 12;

/// A stateless chat bubble: message text with the time underneath.
///
/// Created fresh each frame by the message list. Incoming bubbles sit on the
/// left; outgoing ones on the right with a delivery glyph after the time.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap`, using options matching Ratatui's `Paragraph` wrapping, so
/// the list can size its scroll canvas without rendering first.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub palette: Palette,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, palette: Palette) -> Self {
        Self { message, palette }
    }

    /// Footer text: time, plus the delivery glyph for outgoing messages.
    pub fn meta_text(message: &Message) -> String {
        if message.is_outgoing {
            format!("{} {}", message.timestamp, message.status.glyph())
        } else {
            message.timestamp.clone()
        }
    }

    /// Width the bubble wants inside a list `available` cells wide.
    pub fn layout_width(message: &Message, available: u16) -> u16 {
        let max_width = (available as u32 * MAX_WIDTH_PERCENT as u32 / 100) as u16;
        let max_width = max_width.max(MIN_WIDTH).min(available);

        let text_width = message
            .text
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let meta_width = Self::meta_text(message).width();
        let natural = text_width.max(meta_width) as u16 + HORIZONTAL_OVERHEAD;

        natural.clamp(MIN_WIDTH.min(max_width), max_width)
    }

    /// Height of the bubble when laid out `width` cells wide.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row
            return 1;
        }

        let text = message.text.trim();
        if text.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(text, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn background(&self) -> Style {
        let bg = if self.message.is_outgoing {
            self.palette.outgoing
        } else {
            self.palette.incoming
        };
        Style::default().bg(bg).fg(self.palette.text)
    }

    fn status_style(&self) -> Style {
        match self.message.status {
            MessageStatus::Read => Style::default().fg(self.palette.read_receipt),
            MessageStatus::Sent | MessageStatus::Delivered => self.palette.muted(),
        }
    }
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.border))
            .style(self.background())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area, meta_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        Paragraph::new(self.message.text.trim())
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let mut meta = vec![Span::styled(
            self.message.timestamp.as_str(),
            self.palette.muted().add_modifier(Modifier::DIM),
        )];
        if self.message.is_outgoing {
            meta.push(Span::raw(" "));
            meta.push(Span::styled(self.message.status.glyph(), self.status_style()));
        }
        Paragraph::new(Line::from(meta))
            .alignment(Alignment::Right)
            .render(meta_area, buf);
    }
}

impl<'a> Component for Bubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
