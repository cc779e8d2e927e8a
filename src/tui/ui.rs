use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Header, MessagePanel};
use crate::tui::theme::Palette;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

const PHONE_PANEL_WIDTH: u16 = 36;
const FOOTER_HINTS: &str = "Enter refresh · Ctrl+U clear · Ctrl+T theme · Esc quit";
const COPYRIGHT: &str = "© 2025 VIVIONIFY";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let palette = Palette::for_theme(app.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [header_area, main_area, footer_area] =
        Layout::vertical([Length(2), Min(0), Length(1)]).areas(frame.area());
    let [phone_area, messages_area] =
        Layout::horizontal([Length(PHONE_PANEL_WIDTH), Min(0)]).areas(main_area);

    Header::new(app.theme).render(frame, header_area);
    draw_phone_panel(frame, phone_area, app, tui, palette);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .title("Message Center");
    let inner = block.inner(messages_area);
    frame.render_widget(block, messages_area);
    MessagePanel::new(app, &mut tui.viewer, palette, spinner_frame).render(frame, inner);

    draw_footer(frame, footer_area, palette);
}

fn draw_phone_panel(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    palette: Palette,
) {
    use Constraint::{Length, Min};
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            "📱 Phone Number",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [description_area, input_area, status_area, _] =
        Layout::vertical([Length(3), Length(3), Length(1), Min(0)]).areas(inner);

    let description = Paragraph::new(Span::styled(
        "Enter a phone number to fetch and view WhatsApp messages",
        palette.muted(),
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(description, description_area);

    tui.phone_input.render(frame, input_area);

    let readiness = if app.has_phone() {
        Span::styled("✅ Ready", Style::default().fg(palette.accent))
    } else {
        Span::styled("⏳ Enter phone number", palette.muted())
    };
    frame.render_widget(Paragraph::new(Line::from(readiness)), status_area);
}

fn draw_footer(frame: &mut Frame, area: Rect, palette: Palette) {
    let copyright_width = COPYRIGHT.chars().count() as u16;
    let [hints_area, copyright_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(copyright_width)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER_HINTS, palette.muted())),
        hints_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(COPYRIGHT, palette.muted())).alignment(Alignment::Right),
        copyright_area,
    );
}
