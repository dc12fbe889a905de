/// Deadline used when the user gives none
pub const NO_DEADLINE: &str = "No Deadline";

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task text. Must not contain `~` to survive a save/load round trip.
    pub text: String,
    /// Completion flag
    pub done: bool,
    /// Free-form deadline, `NO_DEADLINE` when none was given
    pub deadline: String,
}

impl Task {
    /// Create a new, not-done task
    pub fn new(text: impl Into<String>, deadline: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            done: false,
            deadline: deadline.into(),
        }
    }

    /// Word written at the end of the persisted line
    pub fn status_word(&self) -> &'static str {
        if self.done { "Done" } else { "Undone" }
    }
}

/// Ordered task list. Position is meaningful: it is the display order and
/// the ordinal written on save.
///
/// Mutators never touch the backing file; callers resave after every
/// mutation that reports a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Add a not-done task at the end
    pub fn append(&mut self, text: impl Into<String>, deadline: impl Into<String>) {
        self.tasks.push(Task::new(text, deadline));
    }

    /// Replace text and deadline at `index`, keeping the done flag.
    /// Returns false (and changes nothing) when `index` is out of bounds.
    pub fn update(
        &mut self,
        index: usize,
        text: impl Into<String>,
        deadline: impl Into<String>,
    ) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.text = text.into();
                task.deadline = deadline.into();
                true
            }
            None => false,
        }
    }

    /// Flip the done flag at `index`. No-op when out of bounds.
    pub fn toggle_done(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    /// Remove the task at `index`, shifting later tasks up
    pub fn remove_at(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    /// Exchange the tasks at `i` and `j`. Returns true only when the list
    /// actually changed.
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        if i == j || i >= self.tasks.len() || j >= self.tasks.len() {
            return false;
        }
        self.tasks.swap(i, j);
        true
    }

    /// Replace the whole list (used by load)
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}
