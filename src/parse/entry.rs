use crate::model::task::{NO_DEADLINE, Task};

use super::list_parser::FIELD_SEPARATOR;

/// Text and deadline typed on the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub text: String,
    pub deadline: String,
}

/// Split an input line on the first `~` into text and deadline.
///
/// Without a `~` the whole input is the text and the deadline is
/// `NO_DEADLINE`. Whitespace around the separator is kept as typed.
pub fn parse_entry(input: &str) -> Entry {
    match input.split_once(FIELD_SEPARATOR) {
        Some((text, deadline)) => Entry {
            text: text.to_string(),
            deadline: deadline.to_string(),
        },
        None => Entry {
            text: input.to_string(),
            deadline: NO_DEADLINE.to_string(),
        },
    }
}

/// Fold line breaks so an entry always stays on one persisted line:
/// `\n` becomes a space and `\r` is dropped.
pub fn flatten_entry(input: &str) -> String {
    input.replace('\n', " ").replace('\r', "")
}

/// Input buffer contents when starting to edit `task`
pub fn prefill_entry(task: &Task) -> String {
    format!("{} {} {}", task.text, FIELD_SEPARATOR, task.deadline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_keeps_entry_on_one_line() {
        assert_eq!(flatten_entry("Buy\nmilk~Friday"), "Buy milk~Friday");
        assert_eq!(flatten_entry("a\r\nb"), "a b");
        assert_eq!(flatten_entry("\r"), "");
    }

    #[test]
    fn text_only_gets_sentinel_deadline() {
        let entry = parse_entry("Buy milk");
        assert_eq!(entry.text, "Buy milk");
        assert_eq!(entry.deadline, NO_DEADLINE);
    }

    #[test]
    fn split_on_first_separator() {
        let entry = parse_entry("Buy milk~2024-01-01");
        assert_eq!(entry.text, "Buy milk");
        assert_eq!(entry.deadline, "2024-01-01");
    }

    #[test]
    fn later_separators_stay_in_deadline() {
        let entry = parse_entry("a~b~c");
        assert_eq!(entry.text, "a");
        assert_eq!(entry.deadline, "b~c");
    }

    #[test]
    fn empty_deadline_after_separator() {
        let entry = parse_entry("Buy milk~");
        assert_eq!(entry.deadline, "");
    }

    #[test]
    fn prefill_puts_spaces_around_separator() {
        let task = Task::new("Buy milk", "2024-01-01");
        assert_eq!(prefill_entry(&task), "Buy milk ~ 2024-01-01");
    }

    #[test]
    fn unchanged_edit_gains_spaces() {
        let task = Task::new("Buy milk", "2024-01-01");
        let entry = parse_entry(&prefill_entry(&task));
        assert_eq!(entry.text, "Buy milk ");
        assert_eq!(entry.deadline, " 2024-01-01");
    }
}
