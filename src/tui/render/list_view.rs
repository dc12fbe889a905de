use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::model::Task;
use crate::tui::app::App;
use crate::tui::layout::{DELETE_LABEL, DONE_LABEL, EDIT_LABEL, ListLayout, RowLayout};
use crate::util::unicode;

use super::helpers::{centered_line, render_button};

pub const HEADER: &str = "To-Do";
pub const EMPTY_HINT: &str = "No tasks yet. Type one below and press Enter.";

/// Render the header and the visible task rows
pub fn render_list_view(frame: &mut Frame, app: &App, layout: &ListLayout) {
    render_header(frame, app, layout);

    if app.list.is_empty() {
        let hint_area = Rect::new(
            layout.list_area.x,
            layout.list_area.y,
            layout.list_area.width,
            layout.list_area.height.min(1),
        );
        let hint = centered_line(EMPTY_HINT, hint_area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(app.theme.dim).bg(app.theme.background),
            ))),
            hint_area,
        );
        return;
    }

    for row in &layout.rows {
        if let Some(task) = app.list.get(row.index) {
            render_row(frame, app, row, task);
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, layout: &ListLayout) {
    let bg = app.theme.background;
    let area = layout.header;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        centered_line(HEADER, width),
        Style::default()
            .fg(app.theme.yellow)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    // Scroll position on the right when the list overflows
    if let (Some(first), Some(last)) = (layout.rows.first(), layout.rows.last())
        && app.list.len() > layout.rows.len()
    {
        let indicator = format!(
            " {}-{} of {} ",
            first.index + 1,
            last.index + 1,
            app.list.len()
        );
        let indicator_w = unicode::display_width(&indicator);
        let header_w = unicode::display_width(HEADER);
        // Only when it does not collide with the centered title
        if indicator_w + header_w + 2 < width / 2 {
            let title = centered_line(HEADER, width - indicator_w);
            spans = vec![
                Span::styled(
                    title,
                    Style::default()
                        .fg(app.theme.yellow)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(indicator, Style::default().fg(app.theme.dim).bg(bg)),
            ];
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_row(frame: &mut Frame, app: &App, row: &RowLayout, task: &Task) {
    let theme = &app.theme;
    let row_bg = if app.drag_hover == Some(row.index) && app.drag_source != Some(row.index) {
        theme.input_bg
    } else if app.cursor == row.index {
        theme.selection_bg
    } else {
        theme.row_bg
    };
    frame.render_widget(Block::default().style(Style::default().bg(row_bg)), row.area);

    let mut text_style = Style::default().fg(theme.task_color(task.done)).bg(row_bg);
    if app.drag_source == Some(row.index) {
        text_style = text_style.add_modifier(Modifier::ITALIC);
    }
    let numbered = format!("{}. {}", row.index + 1, task.text);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            unicode::truncate_to_width(&numbered, row.text.width as usize),
            text_style,
        ))),
        row.text,
    );

    let deadline = format!("Deadline: {}", task.deadline);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            unicode::truncate_to_width(&deadline, row.deadline.width as usize),
            Style::default().fg(theme.dim).bg(row_bg),
        ))),
        row.deadline,
    );

    render_button(frame, theme, row.done_button, DONE_LABEL);
    render_button(frame, theme, row.delete_button, DELETE_LABEL);
    render_button(frame, theme, row.edit_button, EDIT_LABEL);
}
