use crate::model::task::Task;

use super::list_parser::FIELD_SEPARATOR;

/// Serialize one task at the given 1-based ordinal, without line terminator
pub fn serialize_line(ordinal: usize, task: &Task) -> String {
    format!(
        "{}. {}{sep}{}{sep}{}",
        ordinal,
        task.text,
        task.deadline,
        task.status_word(),
        sep = FIELD_SEPARATOR,
    )
}

/// Serialize a task list to its file representation: one line per task in
/// list order, each terminated by `\n`. Ordinals are recomputed from the
/// current positions.
pub fn serialize_list(tasks: &[Task]) -> String {
    let mut out = String::new();
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&serialize_line(i + 1, task));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::NO_DEADLINE;
    use crate::parse::list_parser::parse_list;

    #[test]
    fn serialize_numbers_from_one() {
        let mut done = Task::new("Call Bob", NO_DEADLINE);
        done.done = true;
        let tasks = vec![Task::new("Buy milk", "2024-01-01"), done];
        assert_eq!(
            serialize_list(&tasks),
            "1. Buy milk~2024-01-01~Undone\n2. Call Bob~No Deadline~Done\n"
        );
    }

    #[test]
    fn serialize_empty_list() {
        assert_eq!(serialize_list(&[]), "");
    }

    #[test]
    fn ordinals_follow_current_order() {
        let mut tasks = vec![Task::new("a", "x"), Task::new("b", "y")];
        tasks.swap(0, 1);
        assert_eq!(serialize_list(&tasks), "1. b~y~Undone\n2. a~x~Undone\n");
    }

    #[test]
    fn round_trip_preserves_triples() {
        let mut tasks = vec![
            Task::new("Buy milk", "2024-01-01"),
            Task::new(" padded ", " spaced deadline"),
            Task::new("Dots. In text", NO_DEADLINE),
            Task::new("", ""),
        ];
        tasks[2].done = true;
        let (parsed, dropped) = parse_list(&serialize_list(&tasks));
        assert!(dropped.is_empty());
        assert_eq!(parsed, tasks);
    }

    #[test]
    fn separator_in_text_breaks_round_trip() {
        let tasks = vec![Task::new("a~b", "c")];
        let (parsed, _) = parse_list(&serialize_list(&tasks));
        assert_eq!(parsed[0].text, "a");
        assert_eq!(parsed[0].deadline, "b");
    }
}
