use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::list_io::{ListError, ListFile};
use crate::io::watcher::ListWatcher;
use crate::model::{AppConfig, TaskList};
use crate::parse::{parse_entry, prefill_entry};

use super::input;
use super::layout::{list_height, visible_task_count};
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Typing the name of the list file; nothing else is possible yet
    AwaitingFilename,
    /// Typing a new task
    Browsing,
    /// Typing a replacement for the task at this index
    Editing(usize),
}

/// One-line message shown in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub list: TaskList,
    pub mode: Mode,
    /// Filename while awaiting one, task entry afterwards
    pub input: String,
    /// Backing file, set once the filename is confirmed
    pub file: Option<ListFile>,
    /// Keyboard cursor (task index)
    pub cursor: usize,
    /// First visible task
    pub scroll_offset: usize,
    /// Task under the pointer when a drag started
    pub drag_source: Option<usize>,
    /// Task currently under a dragging pointer
    pub drag_hover: Option<usize>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Terminal area of the last frame
    pub screen: Rect,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            list: TaskList::new(),
            mode: Mode::AwaitingFilename,
            input: config.default_file.clone().unwrap_or_default(),
            file: None,
            cursor: 0,
            scroll_offset: 0,
            drag_source: None,
            drag_hover: None,
            status: None,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            screen: Rect::new(0, 0, 80, 24),
        }
    }

    // -----------------------------------------------------------------------
    // Status row
    // -----------------------------------------------------------------------

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    // -----------------------------------------------------------------------
    // Filename acquisition
    // -----------------------------------------------------------------------

    /// Open `path` as the backing file, load it and switch to browsing.
    /// On failure the app stays in `AwaitingFilename`.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<(), ListError> {
        let mut file = ListFile::open(path)?;
        let report = file.load_into(&mut self.list)?;
        if report.dropped.is_empty() {
            self.set_info(format!("{}: {} tasks", file.path().display(), report.loaded));
        } else {
            self.set_error(format!(
                "{}: skipped {} malformed line(s), see recovery log",
                file.path().display(),
                report.dropped.len()
            ));
        }
        self.file = Some(file);
        self.mode = Mode::Browsing;
        self.input.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
        Ok(())
    }

    /// Confirm the typed filename. Empty input does nothing.
    pub fn confirm_filename(&mut self) {
        if self.mode != Mode::AwaitingFilename || self.input.is_empty() {
            return;
        }
        let name = self.input.clone();
        if let Err(e) = self.open_file(name) {
            self.set_error(e.to_string());
        }
    }

    // -----------------------------------------------------------------------
    // Write-through mutations
    // -----------------------------------------------------------------------

    /// Save the whole list to the backing file
    pub fn persist(&mut self) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(e) = file.save(&self.list) {
            self.set_error(format!("{} (content kept in recovery log)", e));
        }
    }

    /// Submit the input line as a new task, or as the replacement for the
    /// task being edited. Empty input does nothing.
    pub fn submit_entry(&mut self) {
        if self.input.is_empty() {
            return;
        }
        let entry = parse_entry(&self.input);
        match self.mode {
            Mode::AwaitingFilename => return,
            Mode::Editing(index) => {
                if !self.list.update(index, entry.text.clone(), entry.deadline.clone()) {
                    self.list.append(entry.text, entry.deadline);
                }
            }
            Mode::Browsing => {
                self.list.append(entry.text, entry.deadline);
                self.cursor = self.list.len() - 1;
                self.ensure_cursor_visible();
            }
        }
        self.mode = Mode::Browsing;
        self.input.clear();
        self.persist();
    }

    pub fn toggle_done(&mut self, index: usize) {
        if self.list.toggle_done(index) {
            self.persist();
        }
    }

    pub fn delete(&mut self, index: usize) {
        let Some(task) = self.list.remove_at(index) else {
            return;
        };
        if let Some(file) = &self.file {
            file.log_deletion(index + 1, &task);
        }
        match self.mode {
            Mode::Editing(i) if i == index => {
                self.mode = Mode::Browsing;
                self.input.clear();
            }
            Mode::Editing(i) if i > index => self.mode = Mode::Editing(i - 1),
            _ => {}
        }
        if self.cursor > index {
            self.cursor -= 1;
        }
        self.drag_source = None;
        self.drag_hover = None;
        self.clamp_view();
        self.persist();
    }

    /// Start editing the task at `index`, pre-filling the input line
    pub fn begin_edit(&mut self, index: usize) {
        if self.mode == Mode::AwaitingFilename {
            return;
        }
        let Some(task) = self.list.get(index) else {
            return;
        };
        self.input = prefill_entry(task);
        self.mode = Mode::Editing(index);
        self.cursor = index;
    }

    /// Swap two tasks (drag-to-reorder). The edit target and the cursor
    /// follow the task they were on.
    pub fn swap(&mut self, i: usize, j: usize) {
        if !self.list.swap(i, j) {
            return;
        }
        let follow = |k: usize| {
            if k == i {
                j
            } else if k == j {
                i
            } else {
                k
            }
        };
        if let Mode::Editing(k) = self.mode {
            self.mode = Mode::Editing(follow(k));
        }
        self.cursor = follow(self.cursor);
        self.ensure_cursor_visible();
        self.persist();
    }

    /// Move the cursor task one place up (`delta < 0`) or down
    pub fn move_cursor_task(&mut self, delta: isize) {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return;
        };
        self.swap(self.cursor, target);
    }

    /// Reload from disk when the file changed outside this session
    pub fn reload_if_changed(&mut self) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if !file.changed_on_disk() {
            return;
        }
        match file.load_into(&mut self.list) {
            Ok(report) => {
                if let Mode::Editing(i) = self.mode
                    && i >= self.list.len()
                {
                    self.mode = Mode::Browsing;
                    self.input.clear();
                }
                self.drag_source = None;
                self.drag_hover = None;
                self.clamp_view();
                self.set_info(format!("reloaded: {} tasks", report.loaded));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Cursor and scrolling
    // -----------------------------------------------------------------------

    /// Number of tasks that fit on screen
    pub fn visible_tasks(&self) -> usize {
        visible_task_count(list_height(self.screen.height)).max(1)
    }

    pub fn max_scroll(&self) -> usize {
        self.list.len().saturating_sub(self.visible_tasks())
    }

    /// Scroll by `delta` tasks, clamped to the list
    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll_offset.saturating_add_signed(delta);
        self.scroll_offset = next.min(self.max_scroll());
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.list.is_empty() {
            return;
        }
        let next = self.cursor.saturating_add_signed(delta);
        self.cursor = next.min(self.list.len() - 1);
        self.ensure_cursor_visible();
    }

    pub fn ensure_cursor_visible(&mut self) {
        let visible = self.visible_tasks();
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor + 1 - visible;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Keep cursor and scroll inside the list after it shrank
    pub fn clamp_view(&mut self) {
        self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

/// Run the TUI application
pub fn run(config: AppConfig, file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(&config);

    if let Some(path) = file {
        app.open_file(path)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if config.ui.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut watcher: Option<ListWatcher> = None;
    let mut watch_attempted = false;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::Resize(width, height) => {
                    app.screen = Rect::new(0, 0, width, height);
                    app.clamp_view();
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }

        // Start watching once a file has been chosen
        if !watch_attempted && let Some(file) = &app.file {
            watch_attempted = true;
            watcher = ListWatcher::start(file.path()).ok();
        }
        if let Some(w) = &watcher
            && !w.poll().is_empty()
        {
            app.reload_if_changed();
        }
    }
    Ok(())
}
