//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used for creating and
//! editing cards in the TUI, including field ordering and form state
//! management. Submitting an edit produces a sparse `TaskPatch` holding
//! only the fields the user actually changed.

use crate::fields::{Assignee, Priority};
use crate::list::parse_date_input;
use crate::task::{Task, TaskPatch};
use crate::tui::input::InputField;

/// Global order constants for the form fields.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const ASSIGNEES_FIELD: usize = 2;
pub const DATE_FIELD: usize = 3;
pub const PROGRESS_FIELD: usize = 4;
pub const PRIORITY_FIELD: usize = 5;
pub const COLUMN_FIELD: usize = 6;
pub const FIELD_COUNT: usize = 7;

/// Form for creating or editing a task card.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    /// Comma-separated assignee names.
    pub assignees: InputField,
    /// Date text: ISO, "today", "tomorrow", "in Nd".
    pub date: InputField,
    pub progress: InputField,
    pub priority: usize,
    pub column: usize,
    pub current_field: usize,
    pub priorities: Vec<Priority>,
    /// Column titles shown in the column selector, in board order.
    pub column_titles: Vec<String>,
}

impl TaskForm {
    /// Create an empty form over the given column choices.
    pub fn new(column_titles: Vec<String>, selected_column: usize) -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            assignees: InputField::new(),
            date: InputField::new(),
            progress: InputField::with_value("0"),
            priority: 1, // Medium
            column: selected_column.min(column_titles.len().saturating_sub(1)),
            current_field: 0,
            priorities: vec![Priority::High, Priority::Medium, Priority::Low],
            column_titles,
        };
        form.update_active_field();
        form
    }

    /// Create a form prefilled from an existing task.
    pub fn from_task(task: &Task, column_titles: Vec<String>, task_column: usize) -> Self {
        let names: Vec<&str> = task.assignees.iter().map(|a| a.name.as_str()).collect();
        let mut form = Self::new(column_titles, task_column);
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        form.assignees = InputField::with_value(&names.join(", "));
        form.date = InputField::with_value(
            &task.date.map(|d| d.to_string()).unwrap_or_default(),
        );
        form.progress = InputField::with_value(&task.progress.to_string());
        form.priority = form
            .priorities
            .iter()
            .position(|p| *p == task.priority)
            .unwrap_or(1);
        form.update_active_field();
        form
    }

    /// Move focus to the next field, wrapping.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move focus to the previous field, wrapping.
    pub fn previous_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Whether the focused field is a selector rather than a text input.
    pub fn on_selector(&self) -> bool {
        matches!(self.current_field, PRIORITY_FIELD | COLUMN_FIELD)
    }

    /// Cycle the focused selector field.
    pub fn cycle_selector(&mut self, forward: bool) {
        match self.current_field {
            PRIORITY_FIELD => {
                self.priority = cycle(self.priority, self.priorities.len(), forward);
            }
            COLUMN_FIELD => {
                self.column = cycle(self.column, self.column_titles.len(), forward);
            }
            _ => {}
        }
    }

    /// Mark the focused text field active, and only that one.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
        self.assignees.active = self.current_field == ASSIGNEES_FIELD;
        self.date.active = self.current_field == DATE_FIELD;
        self.progress.active = self.current_field == PROGRESS_FIELD;
    }

    /// The focused text input, if the focused field is one.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            ASSIGNEES_FIELD => Some(&mut self.assignees),
            DATE_FIELD => Some(&mut self.date),
            PROGRESS_FIELD => Some(&mut self.progress),
            _ => None,
        }
    }

    /// Selected priority value.
    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Assignees parsed from the comma-separated name list.
    pub fn parsed_assignees(&self) -> Vec<Assignee> {
        self.assignees
            .value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Assignee::named)
            .collect()
    }

    /// Progress clamped to 0-100; unparseable input counts as 0.
    pub fn parsed_progress(&self) -> u8 {
        self.progress.trimmed().parse::<u8>().unwrap_or(0).min(100)
    }

    /// Build a new task record from the form.
    ///
    /// The status is the given column status; placement into the matching
    /// column happens on the board side.
    pub fn build_task(&self, id: String, status: &str) -> Task {
        Task {
            id,
            title: self.title.trimmed().to_string(),
            description: self.description.trimmed().to_string(),
            priority: self.selected_priority(),
            status: status.to_string(),
            assignees: self.parsed_assignees(),
            date: parse_date_input(self.date.trimmed()),
            comments: 0,
            attachments: 0,
            progress: self.parsed_progress(),
            verified: false,
        }
    }

    /// Build a sparse patch against the original task: only fields the user
    /// changed are present.
    pub fn build_patch(&self, original: &Task) -> TaskPatch {
        let mut patch = TaskPatch::default();

        let title = self.title.trimmed();
        if title != original.title {
            patch.title = Some(title.to_string());
        }
        let description = self.description.trimmed();
        if description != original.description {
            patch.description = Some(description.to_string());
        }
        if self.selected_priority() != original.priority {
            patch.priority = Some(self.selected_priority());
        }
        let assignees = self.parsed_assignees();
        if assignees != original.assignees {
            patch.assignees = Some(assignees);
        }
        let date = parse_date_input(self.date.trimmed());
        if date != original.date {
            patch.date = Some(date);
        }
        let progress = self.parsed_progress();
        if progress != original.progress {
            patch.progress = Some(progress);
        }

        patch
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn columns() -> Vec<String> {
        vec!["To Do".into(), "Doing".into(), "Done".into()]
    }

    fn original() -> Task {
        Task {
            id: "task-3".into(),
            title: "Old title".into(),
            description: "Old description".into(),
            priority: Priority::Low,
            status: "todo".into(),
            assignees: vec![Assignee::named("ana")],
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            comments: 2,
            attachments: 0,
            progress: 10,
            verified: false,
        }
    }

    #[test]
    fn test_build_task_parses_fields() {
        let mut form = TaskForm::new(columns(), 0);
        form.title = InputField::with_value("  New card  ");
        form.assignees = InputField::with_value("ana, bo ,");
        form.date = InputField::with_value("2024-09-01");
        form.progress = InputField::with_value("250");

        let task = form.build_task("task-9".into(), "todo");
        assert_eq!(task.title, "New card");
        assert_eq!(task.assignees.len(), 2);
        assert_eq!(task.assignees[1].name, "bo");
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2024, 9, 1));
        assert_eq!(task.progress, 100); // clamped
        assert_eq!(task.status, "todo");
    }

    #[test]
    fn test_build_patch_contains_only_changes() {
        let task = original();
        let mut form = TaskForm::from_task(&task, columns(), 0);
        form.title = InputField::with_value("New title");

        let patch = form.build_patch(&task);
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.description.is_none());
        assert!(patch.priority.is_none());
        assert!(patch.assignees.is_none());
        assert!(patch.date.is_none());
        assert!(patch.progress.is_none());
    }

    #[test]
    fn test_build_patch_can_clear_date() {
        let task = original();
        let mut form = TaskForm::from_task(&task, columns(), 0);
        form.date = InputField::with_value("");
        let patch = form.build_patch(&task);
        assert_eq!(patch.date, Some(None));
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = TaskForm::new(columns(), 1);
        assert_eq!(form.current_field, TITLE_FIELD);
        form.previous_field();
        assert_eq!(form.current_field, COLUMN_FIELD);
        assert!(form.on_selector());
        form.cycle_selector(true);
        assert_eq!(form.column, 2);
        form.next_field();
        assert_eq!(form.current_field, TITLE_FIELD);
    }
}
