//! # Header Component
//!
//! Top bar with the dashboard title, a subtitle, and the theme indicator.
//!
//! Purely presentational: the theme is the only prop. The indicator shows the
//! theme a toggle would switch *to* (☀ while dark, ☾ while light), with the
//! key that does it.

use crate::core::state::Theme;
use crate::tui::component::Component;
use crate::tui::theme::Palette;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub const TITLE: &str = "WhatsApp Message Super Admin (DEV)";
pub const SUBTITLE: &str = "Manage and monitor WhatsApp communications";

pub struct Header {
    pub theme: Theme,
}

impl Header {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn theme_glyph(&self) -> &'static str {
        if self.theme.is_dark() { "☀" } else { "☾" }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let [text_area, toggle_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);

        let lines = vec![
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(SUBTITLE, palette.muted())),
        ];
        frame.render_widget(Paragraph::new(lines), text_area);

        let toggle = Paragraph::new(Line::from(vec![
            Span::styled(self.theme_glyph(), Style::default().fg(palette.accent)),
            Span::styled(" Ctrl+T", palette.muted()),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(toggle, toggle_area);
    }
}
