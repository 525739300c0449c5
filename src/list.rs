//! The master task registry and utility functions shared by its callers.
//!
//! `TaskList` is the authoritative, order-preserving collection of every
//! known task, independent of column placement. Columns only hold ids into
//! this registry. All lookups are linear scans; boards are human-curated
//! and small, so no index is kept.

use chrono::{Duration, Local, NaiveDate};

use crate::task::{Task, TaskPatch};

/// In-memory registry of all tasks known to the board.
#[derive(Debug, Default, Clone)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Register a task and return a reference to it.
    pub fn add(&mut self, task: Task) -> &Task {
        let index = self.tasks.len();
        self.tasks.push(task);
        &self.tasks[index]
    }

    /// Get a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Apply a sparse patch to the task with the given id.
    ///
    /// Unknown ids are a silent no-op returning `None`; callers routinely
    /// probe for existence, so this is not an error.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = &patch.status {
            task.status = status.clone();
        }
        if let Some(assignees) = &patch.assignees {
            task.assignees = assignees.clone();
        }
        if let Some(date) = patch.date {
            task.date = date;
        }
        if let Some(comments) = patch.comments {
            task.comments = comments;
        }
        if let Some(attachments) = patch.attachments {
            task.attachments = attachments;
        }
        if let Some(progress) = patch.progress {
            task.progress = progress;
        }
        if let Some(verified) = patch.verified {
            task.verified = verified;
        }

        Some(task)
    }

    /// Remove the task with the given id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(index);
        true
    }

    /// Case-insensitive substring search over title and description.
    ///
    /// An empty query matches every task; that permissiveness is what lets
    /// the live-search UI start from "everything visible".
    pub fn search(&self, query: &str) -> Vec<&Task> {
        let query = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// All tasks currently carrying the given status, in registry order.
    pub fn get_by_status(&self, status: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Generate the next free "task-N" id.
    ///
    /// Scans existing ids for numeric suffixes so loaded boards with their
    /// own numbering keep counting upward.
    pub fn next_task_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.rsplit('-').next())
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("task-{}", max + 1)
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Parse human-readable date input.
///
/// Supports "today", "tomorrow", "in 3d", "in 2w" and plain "YYYY-MM-DD".
pub fn parse_date_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_date_relative(date: Option<NaiveDate>, today: NaiveDate) -> String {
    match date {
        None => "-".into(),
        Some(d) => {
            let delta = (d - today).num_days();
            if delta == 0 {
                "today".into()
            } else if delta == 1 {
                "tomorrow".into()
            } else if delta > 1 {
                format!("in {delta}d")
            } else {
                format!("{}d late", -delta)
            }
        }
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn task(id: &str, title: &str, description: &str, status: &str) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            status: status.into(),
            assignees: vec![],
            date: None,
            comments: 0,
            attachments: 0,
            progress: 0,
            verified: false,
        }
    }

    fn sample_list() -> TaskList {
        let mut list = TaskList::default();
        list.add(task("t1", "Urgent fix", "Patch the login flow", "todo"));
        list.add(task("t2", "Write docs", "User guide for search", "todo"));
        list.add(task("t3", "Ship release", "Cut v2.0", "done"));
        list
    }

    #[test]
    fn test_update_applies_only_patched_fields() {
        let mut list = sample_list();
        let patch = TaskPatch {
            title: Some("Hotfix".into()),
            ..Default::default()
        };
        let updated = list.update("t1", &patch).unwrap();
        assert_eq!(updated.title, "Hotfix");
        assert_eq!(updated.description, "Patch the login flow");
        assert_eq!(updated.status, "todo");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut list = sample_list();
        let before = list.tasks.clone();
        let patch = TaskPatch {
            title: Some("ghost".into()),
            ..Default::default()
        };
        assert!(list.update("nope", &patch).is_none());
        assert_eq!(list.tasks.len(), before.len());
        for (a, b) in list.tasks.iter().zip(before.iter()) {
            assert_eq!(a.title, b.title);
        }
    }

    #[test]
    fn test_patch_can_clear_date() {
        let mut list = sample_list();
        list.get_mut("t1").unwrap().date = NaiveDate::from_ymd_opt(2024, 1, 5);
        let patch = TaskPatch {
            date: Some(None),
            ..Default::default()
        };
        assert_eq!(list.update("t1", &patch).unwrap().date, None);
    }

    #[test]
    fn test_delete_reports_removal() {
        let mut list = sample_list();
        assert!(list.delete("t2"));
        assert_eq!(list.len(), 2);
        assert!(!list.delete("t2"));
    }

    #[test]
    fn test_search_is_case_insensitive_and_checks_description() {
        let list = sample_list();
        let hits = list.search("URGENT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "t1");

        let hits = list.search("login");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "t1");
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let list = sample_list();
        assert_eq!(list.search("").len(), 3);
        assert!(list.search("ZZZqqq").is_empty());
    }

    #[test]
    fn test_get_by_status_preserves_order() {
        let list = sample_list();
        let todos = list.get_by_status("todo");
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].id, "t1");
        assert_eq!(todos[1].id, "t2");
    }

    #[test]
    fn test_parse_date_input() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date_input("today"), Some(today));
        assert_eq!(parse_date_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(
            parse_date_input("2024-06-15"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert_eq!(parse_date_input("whenever"), None);
    }

    #[test]
    fn test_next_task_id_continues_numbering() {
        let mut list = TaskList::default();
        assert_eq!(list.next_task_id(), "task-1");
        list.add(task("task-7", "Seven", "", "todo"));
        list.add(task("bug-12", "Alien numbering", "", "todo"));
        assert_eq!(list.next_task_id(), "task-13");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longe…");
    }
}
