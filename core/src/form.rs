//! Two-field entry form for new tasks.

use crate::types::CreateTaskRequest;

/// Local state of the task entry form: a title and an optional description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    title: String,
    description: String,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Turns the current fields into a creation request and clears them.
    ///
    /// A blank title (empty or whitespace only) yields `None` and leaves both
    /// fields exactly as typed. The title is emitted as typed, not trimmed;
    /// an empty description is emitted as absent.
    pub fn submit(&mut self) -> Option<CreateTaskRequest> {
        if self.title.trim().is_empty() {
            return None;
        }
        let title = std::mem::take(&mut self.title);
        let description = std::mem::take(&mut self.description);
        Some(CreateTaskRequest {
            title,
            description: (!description.is_empty()).then_some(description),
            completed: false,
        })
    }
}
