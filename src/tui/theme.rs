//! Terminal palette for the dark and light themes.

use ratatui::style::{Color, Style};

use crate::core::state::Theme;

const WHATSAPP_GREEN: Color = Color::Rgb(37, 211, 102);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub incoming: Color,
    pub outgoing: Color,
    pub error: Color,
    /// Colour of the double check on read messages.
    pub read_receipt: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(17, 27, 33),
                text: Color::Rgb(233, 237, 239),
                muted: Color::Rgb(134, 150, 160),
                accent: WHATSAPP_GREEN,
                border: Color::Rgb(53, 69, 79),
                incoming: Color::Rgb(32, 44, 51),
                outgoing: Color::Rgb(0, 92, 75),
                error: Color::Rgb(241, 92, 109),
                read_receipt: Color::Rgb(83, 189, 235),
            },
            Theme::Light => Self {
                background: Color::Rgb(240, 242, 245),
                text: Color::Rgb(17, 27, 33),
                muted: Color::Rgb(102, 119, 129),
                accent: Color::Rgb(0, 128, 105),
                border: Color::Rgb(209, 215, 219),
                incoming: Color::White,
                outgoing: Color::Rgb(217, 253, 211),
                error: Color::Rgb(206, 43, 60),
                read_receipt: Color::Rgb(2, 122, 199),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
