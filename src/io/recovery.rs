use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Maximum size of the recovery log before inline trimming (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Number of days before entries are trimmed from an oversized log.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tildo recovery log: append-only
     Lines tildo could not read, lists it could not save and tasks that were deleted.
     View with: tildo recovery <FILE>
     Safe to delete. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    Parser,
    Write,
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            "delete" => Some(RecoveryCategory::Delete),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Paths and writes
// ---------------------------------------------------------------------------

/// Return the recovery log path for a list file: a hidden sibling named
/// after the list.
pub fn recovery_log_path(list_path: &Path) -> PathBuf {
    let name = list_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tildo".to_string());
    let log_name = format!(".{}.recovery.log", name);
    match list_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(log_name),
        _ => PathBuf::from(log_name),
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
///
/// A symlinked `path` is resolved so the link target is replaced, and an
/// existing file's permissions carry over to the new one.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    if let Ok(meta) = std::fs::metadata(&target) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    pub fn new(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} | {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    /// One-line summary used by the CLI listing
    pub fn summary_line(&self) -> String {
        format!(
            "{}  {:<7} {}",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category.to_string(),
            self.description
        )
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log next to `list_path`. Errors are
/// swallowed and printed to stderr.
pub fn log_recovery(list_path: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(list_path, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(list_path: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(list_path);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        try_inline_trim(&path);
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    file.write_all(entry.to_markdown().as_bytes())?;

    Ok(())
}

/// Drop entries older than `PRUNE_AGE_DAYS` from an oversized log.
fn try_inline_trim(path: &Path) {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
    let trimmed = prune_entries_before(&content, &cutoff);

    if trimmed.len() < content.len() {
        let _ = atomic_write(path, trimmed.as_bytes());
    }
}

/// Record lines that were dropped while loading a list.
pub fn log_dropped_lines(list_path: &Path, dropped: &[String]) {
    if dropped.is_empty() {
        return;
    }
    log_recovery(
        list_path,
        RecoveryEntry::new(RecoveryCategory::Parser, "dropped lines")
            .field("Source", list_path.display().to_string())
            .field("Count", dropped.len().to_string())
            .body(dropped.join("\n")),
    );
}

/// Record the contents of a list that could not be saved.
pub fn log_failed_write(list_path: &Path, error: &str, content: &str) {
    log_recovery(
        list_path,
        RecoveryEntry::new(RecoveryCategory::Write, "save failed")
            .field("Target", list_path.display().to_string())
            .field("Error", error)
            .body(content),
    );
}

/// Record a deleted task in its persisted form.
pub fn log_task_deletion(list_path: &Path, ordinal: usize, task_line: &str) {
    log_recovery(
        list_path,
        RecoveryEntry::new(RecoveryCategory::Delete, format!("task {} deleted", ordinal))
            .field("List", list_path.display().to_string())
            .body(task_line),
    );
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries for a list, most recent first.
pub fn read_recovery_entries(list_path: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let path = recovery_log_path(list_path);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);

    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }

    entries.reverse();
    entries
}

/// Parse all entries from the log content string.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut in_code_block = false;

        for line in lines.by_ref() {
            if line == "---" && !in_code_block {
                break;
            }

            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }

            if line.starts_with("```") {
                in_code_block = true;
                continue;
            }

            if let Some((key, value)) = line.trim().split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> | <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" | ")?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);

    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}

/// Keep the header and every entry at or after `cutoff`.
fn prune_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut out = String::new();
    let mut keep = true;
    let mut in_entries = false;
    let mut in_code_block = false;

    for line in content.lines() {
        if in_code_block {
            if line == "```" {
                in_code_block = false;
            }
        } else if line.starts_with("```") {
            in_code_block = true;
        } else if let Some(header) = line.strip_prefix("## ")
            && let Some((timestamp, _, _)) = parse_entry_header(header)
        {
            in_entries = true;
            keep = timestamp >= *cutoff;
        }
        if !in_entries || keep {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn list_in(dir: &TempDir) -> PathBuf {
        dir.path().join("todo.txt")
    }

    #[test]
    fn recovery_log_is_hidden_sibling() {
        assert_eq!(
            recovery_log_path(Path::new("/tmp/lists/todo.txt")),
            PathBuf::from("/tmp/lists/.todo.txt.recovery.log")
        );
        assert_eq!(
            recovery_log_path(Path::new("todo.txt")),
            PathBuf::from(".todo.txt.recovery.log")
        );
    }

    #[test]
    fn entry_formatting() {
        let entry = RecoveryEntry::new(RecoveryCategory::Write, "save failed")
            .field("Error", "disk full")
            .body("1. a~b~Undone");
        let md = entry.to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains("| write: save failed"));
        assert!(md.contains("Error: disk full\n"));
        assert!(md.contains("```text\n1. a~b~Undone\n```\n"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn header_written_once() {
        let dir = TempDir::new().unwrap();
        let list = list_in(&dir);
        log_dropped_lines(&list, &["junk".to_string()]);
        log_dropped_lines(&list, &["more junk".to_string()]);
        let content = std::fs::read_to_string(recovery_log_path(&list)).unwrap();
        assert_eq!(content.matches("tildo recovery log").count(), 1);
    }

    #[test]
    fn log_and_read_back() {
        let dir = TempDir::new().unwrap();
        let list = list_in(&dir);
        log_dropped_lines(&list, &["junk one".to_string(), "junk two".to_string()]);
        log_task_deletion(&list, 2, "2. Call Bob~No Deadline~Undone");

        let entries = read_recovery_entries(&list, None);
        assert_eq!(entries.len(), 2);
        // Most recent first
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert_eq!(entries[0].description, "task 2 deleted");
        assert_eq!(entries[0].body, "2. Call Bob~No Deadline~Undone");
        assert_eq!(entries[1].category, RecoveryCategory::Parser);
        assert_eq!(entries[1].body, "junk one\njunk two");
        assert!(
            entries[1]
                .fields
                .iter()
                .any(|(k, v)| k == "Count" && v == "2")
        );
    }

    #[test]
    fn read_with_limit_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let list = list_in(&dir);
        for i in 1..=3 {
            log_task_deletion(&list, i, "x~y~Undone");
        }
        let entries = read_recovery_entries(&list, Some(2));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "task 3 deleted");
        assert_eq!(entries[1].description, "task 2 deleted");
    }

    #[test]
    fn no_dropped_lines_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let list = list_in(&dir);
        log_dropped_lines(&list, &[]);
        assert!(!recovery_log_path(&list).exists());
    }

    #[test]
    fn read_missing_log_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_recovery_entries(&list_in(&dir), None).is_empty());
    }

    #[test]
    fn parse_header_rejects_garbage() {
        assert!(parse_entry_header("not a header").is_none());
        assert!(parse_entry_header("2025-01-01T00:00:00Z | bogus: x").is_none());
        let (_, cat, desc) =
            parse_entry_header("2025-01-01T00:00:00Z | parser: dropped lines").unwrap();
        assert_eq!(cat, RecoveryCategory::Parser);
        assert_eq!(desc, "dropped lines");
    }

    #[test]
    fn prune_keeps_header_and_recent_entries() {
        let content = "\
<!-- header -->

---
## 2020-01-01T00:00:00Z | delete: task 1 deleted

---
## 2099-01-01T00:00:00Z | delete: task 2 deleted

---
";
        let cutoff = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let pruned = prune_entries_before(content, &cutoff);
        assert!(pruned.contains("<!-- header -->"));
        assert!(!pruned.contains("task 1 deleted"));
        assert!(pruned.contains("task 2 deleted"));
    }

    #[test]
    fn prune_ignores_headers_inside_bodies() {
        let content = "\
## 2099-01-01T00:00:00Z | parser: dropped lines

Count: 1

```text
## 2020-01-01T00:00:00Z | delete: looks like a header
```

---
## 2020-01-01T00:00:00Z | delete: task 1 deleted

---
";
        let cutoff = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let pruned = prune_entries_before(content, &cutoff);
        assert!(pruned.contains("## 2020-01-01T00:00:00Z | delete: looks like a header\n```\n"));
        assert!(pruned.contains("parser: dropped lines"));
        assert!(!pruned.contains("task 1 deleted"));
        assert_eq!(parse_entries(&pruned).len(), 1);
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        atomic_write(&path, b"new").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_follows_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("out.txt");
        std::fs::write(&real, "old").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();
        atomic_write(&link, b"new").unwrap();
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new");
    }

    #[test]
    fn category_round_trip() {
        for cat in [
            RecoveryCategory::Parser,
            RecoveryCategory::Write,
            RecoveryCategory::Delete,
        ] {
            assert_eq!(RecoveryCategory::parse_category(&cat.to_string()), Some(cat));
        }
        assert_eq!(RecoveryCategory::parse_category("conflict"), None);
    }
}
