use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

use super::typed_char;

/// Keys on the list screen (browsing or editing)
pub(super) fn handle_list_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let reorder = key
        .modifiers
        .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter => app.submit_entry(),
        KeyCode::Backspace => {
            unicode::pop_grapheme(&mut app.input);
        }
        KeyCode::Up if reorder => app.move_cursor_task(-1),
        KeyCode::Down if reorder => app.move_cursor_task(1),
        KeyCode::Up => app.move_cursor(-1),
        KeyCode::Down => app.move_cursor(1),
        KeyCode::PageUp => app.scroll_by(-(app.visible_tasks() as isize)),
        KeyCode::PageDown => app.scroll_by(app.visible_tasks() as isize),
        KeyCode::Delete => app.delete(app.cursor),
        KeyCode::Char('d') if ctrl => app.toggle_done(app.cursor),
        KeyCode::Char('e') if ctrl => app.begin_edit(app.cursor),
        _ => {
            if let Some(c) = typed_char(&key) {
                app.input.push(c);
            }
        }
    }
}
