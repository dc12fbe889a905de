use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::util::unicode;

use super::typed_char;

/// Keys while awaiting the list filename: everything goes to the name buffer
pub(super) fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_filename(),
        KeyCode::Backspace => {
            unicode::pop_grapheme(&mut app.input);
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                app.input.push(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;
    use crossterm::event::KeyCode;
    use tempfile::TempDir;

    #[test]
    fn typing_fills_name_buffer() {
        let mut app = prompt_app();
        type_str(&mut app, "todo.txt");
        assert_eq!(app.input, "todo.txt");
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "todo.tx");
    }

    #[test]
    fn arrows_are_ignored_while_awaiting() {
        let mut app = prompt_app();
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.mode, Mode::AwaitingFilename);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn empty_name_does_nothing() {
        let mut app = prompt_app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::AwaitingFilename);
        assert!(app.file.is_none());
    }

    #[test]
    fn enter_creates_and_loads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        std::fs::write(&path, "1. Buy milk~2024-01-01~Done\n").unwrap();

        let mut app = prompt_app();
        type_str(&mut app, &path.display().to_string());
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Browsing);
        assert!(app.input.is_empty());
        assert_eq!(app.list.len(), 1);
        assert!(app.list.get(0).unwrap().done);
    }

    #[test]
    fn new_file_is_created_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.txt");

        let mut app = prompt_app();
        type_str(&mut app, &path.display().to_string());
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Browsing);
        assert!(path.exists());
        assert!(app.list.is_empty());
    }

    #[test]
    fn unopenable_file_keeps_prompt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/todo.txt");

        let mut app = prompt_app();
        type_str(&mut app, &path.display().to_string());
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::AwaitingFilename);
        assert!(app.status.as_ref().unwrap().is_error);
        assert!(!app.input.is_empty());
    }
}
