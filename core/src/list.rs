//! Stateless view model over an ordered task sequence.

use crate::types::{Task, TaskId};

pub const EMPTY_MESSAGE: &str = "No tasks yet. Create your first task!";

/// What the list shows for a given task sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<'a> {
    Empty(&'static str),
    Rows(Vec<TaskRow<'a>>),
}

/// One displayed task: a completion checkbox, the text, a delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub id: TaskId,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub checked: bool,
}

impl TaskRow<'_> {
    pub fn on_toggle(&self) -> ListIntent {
        ListIntent::Toggle(self.id)
    }

    pub fn on_delete(&self) -> ListIntent {
        ListIntent::Delete(self.id)
    }
}

/// User action raised from a row, addressed by task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListIntent {
    Toggle(TaskId),
    Delete(TaskId),
}

/// Renders `tasks` in the order given.
pub fn render(tasks: &[Task]) -> ListView<'_> {
    if tasks.is_empty() {
        return ListView::Empty(EMPTY_MESSAGE);
    }
    ListView::Rows(
        tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                title: &task.title,
                description: task.description.as_deref().filter(|d| !d.is_empty()),
                checked: task.completed,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, title: &str, description: Option<&str>, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            owner_id: Some(1),
            completed,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_sequence_renders_only_the_placeholder() {
        assert_eq!(render(&[]), ListView::Empty(EMPTY_MESSAGE));
    }

    #[test]
    fn one_row_per_task_in_input_order() {
        let tasks = vec![
            task(9, "Nine", None, true),
            task(2, "Two", Some("second"), false),
            task(5, "Five", Some(""), true),
        ];
        let ListView::Rows(rows) = render(&tasks) else {
            panic!("expected rows");
        };
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![9, 2, 5]);
        assert_eq!(rows.iter().map(|r| r.checked).collect::<Vec<_>>(), vec![true, false, true]);
        assert_eq!(rows[1].description, Some("second"));
        assert_eq!(rows[2].description, None);
    }

    #[test]
    fn rows_emit_intents_by_id() {
        let tasks = vec![task(4, "Four", None, false)];
        let ListView::Rows(rows) = render(&tasks) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].on_toggle(), ListIntent::Toggle(4));
        assert_eq!(rows[0].on_delete(), ListIntent::Delete(4));
    }
}
