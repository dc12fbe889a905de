use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::layout::{ADD_LABEL, ListLayout, SAVE_LABEL};
use crate::util::unicode;

use super::helpers::{centered_line, render_button};

/// Render the task input box and the Add / Save button next to it
pub fn render_input_row(frame: &mut Frame, app: &App, layout: &ListLayout) {
    let editing = matches!(app.mode, Mode::Editing(_));
    let prefix = if editing { "Edit: " } else { "Input: " };

    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.input_bg);
    let width = layout.input_box.width as usize;
    let room = width.saturating_sub(unicode::display_width(prefix) + 1);
    let shown = format!(
        "{}{}\u{258C}",
        prefix,
        unicode::tail_to_width(&app.input, room)
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(centered_line(&shown, width), style)))
            .style(style),
        layout.input_box,
    );

    let label = if editing { SAVE_LABEL } else { ADD_LABEL };
    render_button(frame, &app.theme, layout.submit_button, label);
}
