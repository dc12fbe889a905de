mod list;
mod mouse;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::parse::flatten_entry;

use list::handle_list_key;
use prompt::handle_prompt_key;

pub use mouse::handle_mouse;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Esc and Ctrl-C leave from any mode; every change is already on disk
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::AwaitingFilename => handle_prompt_key(app, key),
        Mode::Browsing | Mode::Editing(_) => handle_list_key(app, key),
    }
}

/// Handle a bracketed paste event (terminal sends pasted text as a single string).
/// Newlines become spaces so a paste never submits.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    app.input.push_str(&flatten_entry(text));
}

/// Typed character for text input, if the key is one
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
