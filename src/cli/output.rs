use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub ordinal: usize,
    pub text: String,
    pub deadline: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub file: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        ordinal: index + 1,
        text: task.text.clone(),
        deadline: task.deadline.clone(),
        done: task.done,
    }
}

pub fn recovery_entry_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.clone(),
        body: entry.body.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Format a task as `N. [x] text (deadline)`
pub fn format_task_line(index: usize, task: &Task) -> String {
    format!(
        "{}. {} {} ({})",
        index + 1,
        checkbox(task.done),
        task.text,
        task.deadline
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::NO_DEADLINE;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_line_shows_checkbox_and_deadline() {
        let mut task = Task::new("Buy milk", NO_DEADLINE);
        assert_eq!(format_task_line(0, &task), "1. [ ] Buy milk (No Deadline)");
        task.done = true;
        assert_eq!(format_task_line(4, &task), "5. [x] Buy milk (No Deadline)");
    }

    #[test]
    fn task_json_is_one_based() {
        let task = Task::new("Call Bob", "Friday");
        let json = serde_json::to_string(&task_to_json(2, &task)).unwrap();
        assert_eq!(
            json,
            r#"{"ordinal":3,"text":"Call Bob","deadline":"Friday","done":false}"#
        );
    }
}
