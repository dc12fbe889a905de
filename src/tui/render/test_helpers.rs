use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::{AppConfig, NO_DEADLINE};
use crate::tui::app::{App, Mode};
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A fresh app waiting for a filename.
pub fn prompt_app() -> App {
    App::new(&AppConfig::default())
}

/// A browsing app holding `texts` as undone tasks, with no backing file.
pub fn app_with_tasks(texts: &[&str]) -> App {
    let mut app = prompt_app();
    for text in texts {
        app.list.append(*text, NO_DEADLINE);
    }
    app.mode = Mode::Browsing;
    app
}

/// A browsing app backed by `todo.txt` in a temp dir, seeded with `lines`.
pub fn app_on_disk(lines: &[&str]) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.txt");
    let content = if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    };
    std::fs::write(&path, content).unwrap();

    let mut app = prompt_app();
    app.open_file(&path).unwrap();
    (dir, app)
}

/// Current content of the app's backing file.
pub fn file_content(app: &App) -> String {
    let file = app.file.as_ref().expect("app has no backing file");
    std::fs::read_to_string(file.path()).unwrap()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Feed `text` to the app one keystroke at a time.
pub fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        handle_key(app, key(KeyCode::Char(c)));
    }
}
