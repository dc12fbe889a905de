pub mod helpers;
pub mod input_row;
pub mod list_view;
pub mod prompt_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;
use super::layout::{self, ScreenLayout};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if app.screen != area {
        app.screen = area;
        app.clamp_view();
    }

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    match layout::compute(area, app) {
        ScreenLayout::Prompt(prompt) => {
            prompt_view::render_prompt_view(frame, app, &prompt);
            status_row::render_status_row(frame, app, prompt.status);
        }
        ScreenLayout::List(list) => {
            list_view::render_list_view(frame, app, &list);
            input_row::render_input_row(frame, app, &list);
            status_row::render_status_row(frame, app, list.status);
        }
    }
}
