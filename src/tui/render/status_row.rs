use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the status row (bottom of screen): last message on the left,
/// key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let fg = if status.is_error {
            app.theme.red
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(
            unicode::truncate_to_width(&status.text, width),
            Style::default().fg(fg).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = key_hint(app.mode);
        let content_width = spans_width(&spans);
        let hint_width = unicode::display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::AwaitingFilename => "Enter open  Esc quit",
        Mode::Browsing => "Enter add  ^D done  Del delete  ^E edit  Alt-\u{2191}\u{2193} move  Esc quit",
        Mode::Editing(_) => "Enter save  Esc quit",
    }
}
