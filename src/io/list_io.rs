use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::io::recovery;
use crate::model::task::TaskList;
use crate::parse::{parse_list, serialize_line, serialize_list};

/// Error type for list file operations
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("no list file name given")]
    EmptyPath,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of a successful load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of tasks now in the list
    pub loaded: usize,
    /// Lines skipped because they were malformed
    pub dropped: Vec<String>,
}

/// Overwrite `path` with the serialized list. An empty path is a no-op.
pub fn save_list(path: &Path, list: &TaskList) -> Result<(), ListError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    let content = serialize_list(list.tasks());
    recovery::atomic_write(path, content.as_bytes()).map_err(|e| ListError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Replace `list` with the contents of `path`.
///
/// An empty path is a no-op. When the file cannot be read the list is left
/// untouched and the error is returned.
pub fn load_list(path: &Path, list: &mut TaskList) -> Result<LoadReport, ListError> {
    if path.as_os_str().is_empty() {
        return Ok(LoadReport {
            loaded: list.len(),
            dropped: Vec::new(),
        });
    }
    let content = read_list_text(path)?;
    let (tasks, dropped) = parse_list(&content);
    list.replace_all(tasks);
    Ok(LoadReport {
        loaded: list.len(),
        dropped,
    })
}

/// Read the list file as text. Bytes that are not valid UTF-8 become
/// U+FFFD instead of failing the whole load.
fn read_list_text(path: &Path) -> Result<String, ListError> {
    let bytes = fs::read(path).map_err(|e| ListError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Create `path` if missing without truncating an existing file.
pub fn touch_list(path: &Path) -> Result<(), ListError> {
    if path.as_os_str().is_empty() {
        return Err(ListError::EmptyPath);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| ListError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

/// The backing file chosen for a session.
///
/// Wraps the codec with the recovery log: dropped lines, failed saves and
/// deleted tasks are recorded next to the list.
#[derive(Debug, Clone)]
pub struct ListFile {
    path: PathBuf,
    /// Content of the last successful save or load
    last_synced: Option<String>,
}

impl ListFile {
    /// Open (creating if needed) the list file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ListError> {
        let path = path.into();
        touch_list(&path)?;
        Ok(ListFile {
            path,
            last_synced: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load into `list`, logging dropped lines to the recovery log
    pub fn load_into(&mut self, list: &mut TaskList) -> Result<LoadReport, ListError> {
        let report = load_list(&self.path, list)?;
        recovery::log_dropped_lines(&self.path, &report.dropped);
        self.last_synced = read_list_text(&self.path).ok();
        Ok(report)
    }

    /// Save `list`. On failure the serialized content goes to the recovery
    /// log so nothing typed is lost.
    pub fn save(&mut self, list: &TaskList) -> Result<(), ListError> {
        match save_list(&self.path, list) {
            Ok(()) => {
                self.last_synced = Some(serialize_list(list.tasks()));
                Ok(())
            }
            Err(e) => {
                recovery::log_failed_write(
                    &self.path,
                    &e.to_string(),
                    &serialize_list(list.tasks()),
                );
                Err(e)
            }
        }
    }

    /// Record a deleted task before it disappears from the file
    pub fn log_deletion(&self, ordinal: usize, task: &crate::model::task::Task) {
        recovery::log_task_deletion(&self.path, ordinal, &serialize_line(ordinal, task));
    }

    /// True when the file on disk differs from what was last saved or loaded
    pub fn changed_on_disk(&self) -> bool {
        match read_list_text(&self.path) {
            Ok(content) => self.last_synced.as_deref() != Some(content.as_str()),
            Err(_) => false,
        }
    }
}
