//! # Welcome Panel
//!
//! Shown in the message panel while no phone number is entered.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const WELCOME_TITLE: &str = "WhatsApp Message Viewer";
pub const WELCOME_HINT: &str = "Enter a phone number to fetch WhatsApp messages";

pub struct Welcome {
    pub palette: Palette,
}

impl Component for Welcome {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                format!("📱 {WELCOME_TITLE}"),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(WELCOME_HINT, self.palette.muted())),
        ];

        let height = lines.len() as u16;
        let [text_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, text_area);
    }
}
