use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::layout::{PromptLayout, SAVE_LABEL};
use crate::util::unicode;

use super::helpers::{centered_line, render_button};

pub const PROMPT_TITLE: &str = "Enter filename and click Save:";

/// Render the filename prompt: title, name box and Save button
pub fn render_prompt_view(frame: &mut Frame, app: &App, layout: &PromptLayout) {
    let bg = app.theme.background;

    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let title = centered_line(PROMPT_TITLE, layout.title.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(title, title_style))),
        layout.title,
    );

    // Name box, centered text with a block cursor
    let box_style = Style::default().fg(app.theme.text_bright).bg(app.theme.input_bg);
    let width = layout.name_box.width as usize;
    let shown = unicode::tail_to_width(&app.input, width.saturating_sub(1));
    let text = centered_line(&format!("{}\u{258C}", shown), width);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, box_style))).style(box_style),
        layout.name_box,
    );

    render_button(frame, &app.theme, layout.save_button, SAVE_LABEL);
}
