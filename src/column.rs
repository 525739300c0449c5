//! Board columns: ordered partitions of tasks sharing a status.
//!
//! A column stores task ids, not tasks; the `TaskList` registry owns the
//! task data. Membership and the status invariant (every task in a column
//! carries that column's status) are maintained here and by `KanbanBoard`.

use serde::{Deserialize, Serialize};

use crate::list::TaskList;
use crate::task::Task;

/// Declarative column definition, as fed to the board at initialization.
///
/// Everything past id/title/status is a presentation hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub accent_color: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub show_add_button: bool,
    #[serde(default)]
    pub is_active_column: bool,
}

impl ColumnConfig {
    /// Minimal config with default presentation hints.
    pub fn new(id: &str, title: &str, status: &str) -> Self {
        ColumnConfig {
            id: id.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            accent_color: String::new(),
            badge: String::new(),
            show_add_button: false,
            is_active_column: false,
        }
    }
}

/// An ordered column of task ids sharing one status.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub status: String,
    pub task_ids: Vec<String>,
    pub accent_color: String,
    pub badge: String,
    pub show_add_button: bool,
    pub is_active_column: bool,
}

impl Column {
    /// Create an empty column from its definition.
    pub fn new(config: ColumnConfig) -> Self {
        Column {
            id: config.id,
            title: config.title,
            status: config.status,
            task_ids: Vec::new(),
            accent_color: config.accent_color,
            badge: config.badge,
            show_add_button: config.show_add_button,
            is_active_column: config.is_active_column,
        }
    }

    /// Append a task to this column, rewriting its status to the column's.
    ///
    /// The rewrite is unconditional; it is what keeps task status and column
    /// membership in agreement no matter where the task came from.
    pub fn add_task(&mut self, task: &mut Task) {
        task.set_status(&self.status);
        self.task_ids.push(task.id.clone());
    }

    /// Remove a task id from this column's sequence.
    ///
    /// Returns the removed id, or `None` if the task was not a member.
    /// The task's status is left untouched.
    pub fn remove_task(&mut self, task_id: &str) -> Option<String> {
        let index = self.task_ids.iter().position(|id| id == task_id)?;
        Some(self.task_ids.remove(index))
    }

    /// Whether the given task id is a member of this column.
    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }

    /// Number of tasks currently in the column.
    pub fn task_count(&self) -> usize {
        self.task_ids.len()
    }

    /// Reorder the column by ascending date.
    ///
    /// Undated tasks (and ids the registry no longer knows) sort after all
    /// dated ones.
    pub fn sort_by_date(&mut self, tasks: &TaskList) {
        self.task_ids.sort_by_key(|id| {
            tasks
                .get(id)
                .and_then(|task| task.date)
                .map_or((1, None), |date| (0, Some(date)))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, status: &str, date: Option<&str>) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: String::new(),
            priority: Default::default(),
            status: status.into(),
            assignees: vec![],
            date: date.map(|d| d.parse().unwrap()),
            comments: 0,
            attachments: 0,
            progress: 0,
            verified: false,
        }
    }

    #[test]
    fn test_add_task_adopts_column_status() {
        let mut column = Column::new(ColumnConfig::new("col-rev", "Review", "review"));
        let mut t = task("t1", "todo", None);
        column.add_task(&mut t);
        assert_eq!(t.status, "review");
        assert!(column.contains("t1"));
        assert_eq!(column.task_count(), 1);
    }

    #[test]
    fn test_add_task_is_idempotent_on_matching_status() {
        let mut column = Column::new(ColumnConfig::new("col-rev", "Review", "review"));
        let mut t = task("t1", "review", Some("2024-05-01"));
        t.progress = 55;
        column.add_task(&mut t);
        assert_eq!(t.status, "review");
        assert_eq!(t.progress, 55);
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_remove_task_keeps_status() {
        let mut column = Column::new(ColumnConfig::new("c", "C", "doing"));
        let mut t = task("t1", "todo", None);
        column.add_task(&mut t);
        assert_eq!(column.remove_task("t1").as_deref(), Some("t1"));
        assert_eq!(t.status, "doing");
        assert_eq!(column.remove_task("t1"), None);
    }

    #[test]
    fn test_sort_by_date_puts_undated_last() {
        let mut tasks = TaskList::default();
        tasks.add(task("a", "todo", Some("2024-03-01")));
        tasks.add(task("b", "todo", None));
        tasks.add(task("c", "todo", Some("2024-01-01")));
        tasks.add(task("d", "todo", None));

        let mut column = Column::new(ColumnConfig::new("c", "C", "todo"));
        column.task_ids = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        column.sort_by_date(&tasks);

        assert_eq!(column.task_ids[0], "c");
        assert_eq!(column.task_ids[1], "a");
        // Both undated tasks land after every dated one.
        assert!(column.task_ids[2..].contains(&"b".to_string()));
        assert!(column.task_ids[2..].contains(&"d".to_string()));
    }

    #[test]
    fn test_config_defaults() {
        let config: ColumnConfig =
            serde_json::from_str(r#"{"id": "c1", "title": "Todo", "status": "todo"}"#).unwrap();
        assert_eq!(config.accent_color, "");
        assert!(!config.show_add_button);
        assert!(!config.is_active_column);
    }
}
