use crate::model::task::Task;

/// Separator between the fields of a persisted line
pub const FIELD_SEPARATOR: char = '~';

/// Marker between the ordinal and the rest of the line
const ORDINAL_MARKER: &str = ". ";

/// Parse a task list file.
///
/// Returns the parsed tasks in file order and the lines that were dropped
/// because they lack one or both field separators. Blank lines are skipped
/// without being reported.
pub fn parse_list(source: &str) -> (Vec<Task>, Vec<String>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    for line in source.lines() {
        match parse_line(line) {
            Some(task) => tasks.push(task),
            None => {
                if !line.trim().is_empty() {
                    dropped.push(line.to_string());
                }
            }
        }
    }

    (tasks, dropped)
}

/// Parse one persisted line: `<ordinal>. <text>~<deadline>~<Done|Undone>`.
///
/// Everything up to and including the first `". "` is discarded as the
/// ordinal; when the marker is absent the whole line is used.
pub fn parse_line(line: &str) -> Option<Task> {
    let rest = strip_ordinal(line);

    let (text, tail) = rest.split_once(FIELD_SEPARATOR)?;
    let (deadline, status) = tail.split_once(FIELD_SEPARATOR)?;

    Some(Task {
        text: text.to_string(),
        done: status == "Done",
        deadline: deadline.to_string(),
    })
}

fn strip_ordinal(line: &str) -> &str {
    match line.find(ORDINAL_MARKER) {
        Some(pos) => &line[pos + ORDINAL_MARKER.len()..],
        None => line,
    }
}
