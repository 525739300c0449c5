//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct that represents a single card
//! on the board, plus the sparse `TaskPatch` record used for partial updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{Assignee, Priority, DONE_STATUS};

/// A single unit of work on the board.
///
/// The id is assigned at creation and never changes. The status names the
/// column that should hold the task; keeping the two in agreement is the
/// column's and board's job, not the task's (`Column::add_task` rewrites it
/// unconditionally).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub status: String,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    /// ISO date, absent = unscheduled.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub attachments: u32,
    /// Percentage complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub verified: bool,
}

impl Task {
    /// Mark this task finished: done status, verified, full progress.
    pub fn mark_complete(&mut self) {
        self.status = DONE_STATUS.to_string();
        self.verified = true;
        self.progress = 100;
    }

    /// Set the status unconditionally. The value is not checked against the
    /// board's columns; callers that care do that themselves.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// A sparse update: only the fields present are applied.
///
/// `date` is doubly wrapped so a patch can distinguish "leave the date
/// alone" (`None`) from "clear the date" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    pub assignees: Option<Vec<Assignee>>,
    pub date: Option<Option<NaiveDate>>,
    pub comments: Option<u32>,
    pub attachments: Option<u32>,
    pub progress: Option<u8>,
    pub verified: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn sample_task() -> Task {
        Task {
            id: "t1".into(),
            title: "Write release notes".into(),
            description: "Summarise changes".into(),
            priority: Priority::Low,
            status: "in-progress".into(),
            assignees: vec![],
            date: None,
            comments: 3,
            attachments: 1,
            progress: 40,
            verified: false,
        }
    }

    #[test]
    fn test_mark_complete_overwrites_state() {
        let mut task = sample_task();
        task.mark_complete();
        assert_eq!(task.status, DONE_STATUS);
        assert!(task.verified);
        assert_eq!(task.progress, 100);
        // Unrelated fields untouched.
        assert_eq!(task.comments, 3);
        assert_eq!(task.title, "Write release notes");
    }

    #[test]
    fn test_set_status_is_unvalidated() {
        let mut task = sample_task();
        task.set_status("someday-maybe");
        assert_eq!(task.status, "someday-maybe");
    }

    #[test]
    fn test_record_defaults_on_deserialize() {
        let task: Task = serde_json::from_str(
            r#"{"id": "t9", "title": "Minimal", "status": "todo"}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.description, "");
        assert!(task.assignees.is_empty());
        assert_eq!(task.date, None);
        assert_eq!(task.comments, 0);
        assert_eq!(task.attachments, 0);
        assert_eq!(task.progress, 0);
        assert!(!task.verified);
    }

    #[test]
    fn test_record_parses_iso_date() {
        let task: Task = serde_json::from_str(
            r#"{"id": "t2", "title": "Dated", "status": "todo", "date": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }
}
