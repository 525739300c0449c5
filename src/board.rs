//! The board aggregate: owns the column set and the task registry, and
//! carries the cross-column invariants.
//!
//! Two invariants hold after every public operation:
//! - a task id appears in at most one column's sequence;
//! - a task that is in a column carries that column's status.
//!
//! Tasks registered but in no column are "unplaced"; they stay searchable
//! and are reported rather than silently lost.

use crate::column::{Column, ColumnConfig};
use crate::fields::DONE_STATUS;
use crate::list::TaskList;
use crate::task::Task;

/// Aggregate root for one kanban board.
#[derive(Debug, Default, Clone)]
pub struct KanbanBoard {
    pub columns: Vec<Column>,
    pub tasks: TaskList,
}

impl KanbanBoard {
    /// Construct an empty board.
    pub fn new() -> Self {
        KanbanBoard::default()
    }

    /// Replace the column set wholesale and bulk-load the initial tasks.
    ///
    /// Every record is registered in the task registry; each is then placed
    /// into the column whose status matches its own. Records that match no
    /// column stay registered but unplaced, and their ids are returned so
    /// the caller can surface the mismatch.
    pub fn initialize(
        &mut self,
        column_configs: Vec<ColumnConfig>,
        initial_tasks: Vec<Task>,
    ) -> Vec<String> {
        self.columns = column_configs.into_iter().map(Column::new).collect();
        self.tasks = TaskList::default();

        let mut unplaced = Vec::new();
        for record in initial_tasks {
            let id = record.id.clone();
            if !self.add_task(record) {
                unplaced.push(id);
            }
        }
        unplaced
    }

    /// Register a task and place it into the column matching its status.
    ///
    /// Returns whether the task found a column; an unmatched status leaves
    /// it registered but unplaced.
    pub fn add_task(&mut self, record: Task) -> bool {
        let id = record.id.clone();
        let status = record.status.clone();
        self.tasks.add(record);

        if let Some(column) = self.columns.iter_mut().find(|c| c.status == status) {
            if let Some(task) = self.tasks.get_mut(&id) {
                column.add_task(task);
                return true;
            }
        }
        false
    }

    /// Find a column by id.
    pub fn get_column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// The column currently holding the given task, if any.
    pub fn column_of(&self, task_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains(task_id))
    }

    /// Move a task between columns as one transaction.
    ///
    /// Returns false, with board state untouched, when either column id is
    /// unknown or the task is not in the source column. On success the task
    /// sits at the end of the destination column and carries its status.
    pub fn move_task(&mut self, task_id: &str, from_column_id: &str, to_column_id: &str) -> bool {
        let Some(from_idx) = self.columns.iter().position(|c| c.id == from_column_id) else {
            return false;
        };
        let Some(to_idx) = self.columns.iter().position(|c| c.id == to_column_id) else {
            return false;
        };
        let Some(position) = self.columns[from_idx]
            .task_ids
            .iter()
            .position(|id| id == task_id)
        else {
            return false;
        };

        let Some(removed) = self.columns[from_idx].remove_task(task_id) else {
            return false;
        };
        // A column id without a registry entry means the board was corrupted
        // from outside; restore the source column rather than drop the task.
        let Some(task) = self.tasks.get_mut(task_id) else {
            self.columns[from_idx].task_ids.insert(position, removed);
            return false;
        };
        self.columns[to_idx].add_task(task);
        true
    }

    /// Append a column to the board.
    pub fn add_column(&mut self, config: ColumnConfig) {
        self.columns.push(Column::new(config));
    }

    /// Remove a column by id. Returns whether a column was found.
    ///
    /// Tasks the column held are not deleted or relocated; they remain in
    /// the registry as unplaced tasks, visible via [`unplaced_tasks`].
    ///
    /// [`unplaced_tasks`]: KanbanBoard::unplaced_tasks
    pub fn remove_column(&mut self, column_id: &str) -> bool {
        let Some(index) = self.columns.iter().position(|c| c.id == column_id) else {
            return false;
        };
        self.columns.remove(index);
        true
    }

    /// Mark a task complete and rehome it to the done column.
    ///
    /// The completion rewrite sets the done status, so membership has to
    /// follow: the task leaves its current column and joins the column whose
    /// status is the done sentinel. With no such column on the board the
    /// task becomes unplaced.
    pub fn complete_task(&mut self, task_id: &str) -> bool {
        if self.tasks.get(task_id).is_none() {
            return false;
        }
        if let Some(column) = self.columns.iter_mut().find(|c| c.contains(task_id)) {
            column.remove_task(task_id);
        }
        if let Some(task) = self.tasks.get_mut(task_id) {
            task.mark_complete();
        }
        if let Some(done_idx) = self.columns.iter().position(|c| c.status == DONE_STATUS) {
            if let Some(task) = self.tasks.get_mut(task_id) {
                self.columns[done_idx].add_task(task);
            }
        }
        true
    }

    /// Delete a task from the registry and from whichever column holds it.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        if let Some(column) = self.columns.iter_mut().find(|c| c.contains(task_id)) {
            column.remove_task(task_id);
        }
        self.tasks.delete(task_id)
    }

    /// Search the entire task population, placed and unplaced alike.
    pub fn search_tasks(&self, query: &str) -> Vec<&Task> {
        self.tasks.search(query)
    }

    /// Tasks registered in the registry but held by no column.
    pub fn unplaced_tasks(&self) -> Vec<&Task> {
        self.tasks
            .tasks
            .iter()
            .filter(|t| !self.columns.iter().any(|c| c.contains(&t.id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn record(id: &str, title: &str, status: &str) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: String::new(),
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

    fn three_columns() -> Vec<ColumnConfig> {
        vec![
            ColumnConfig::new("col-todo", "To Do", "todo"),
            ColumnConfig::new("col-doing", "In Progress", "doing"),
            ColumnConfig::new("col-done", "Done", "done"),
        ]
    }

    fn sample_board() -> KanbanBoard {
        let mut board = KanbanBoard::new();
        let unplaced = board.initialize(
            three_columns(),
            vec![
                record("t1", "Design schema", "todo"),
                record("t2", "Build parser", "doing"),
                record("t3", "Release v1", "done"),
            ],
        );
        assert!(unplaced.is_empty());
        board
    }

    /// Every registered id is in at most one column, and column status
    /// agrees with task status for every member.
    fn assert_partition_invariant(board: &KanbanBoard) {
        for task in &board.tasks.tasks {
            let holders: Vec<&Column> = board
                .columns
                .iter()
                .filter(|c| c.contains(&task.id))
                .collect();
            assert!(holders.len() <= 1, "task {} in {} columns", task.id, holders.len());
            if let Some(column) = holders.first() {
                assert_eq!(task.status, column.status, "status drift on {}", task.id);
            }
        }
    }

    #[test]
    fn test_initialize_places_by_status() {
        let board = sample_board();
        assert_eq!(board.get_column("col-todo").unwrap().task_ids, vec!["t1"]);
        assert_eq!(board.get_column("col-doing").unwrap().task_ids, vec!["t2"]);
        assert_eq!(board.get_column("col-done").unwrap().task_ids, vec!["t3"]);
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_initialize_reports_unmatched_status() {
        let mut board = KanbanBoard::new();
        let unplaced = board.initialize(
            three_columns(),
            vec![
                record("t1", "Placed", "todo"),
                record("t2", "Limbo", "archived"),
            ],
        );
        assert_eq!(unplaced, vec!["t2"]);
        // Still registered and searchable, just not on the board.
        assert!(board.tasks.get("t2").is_some());
        assert_eq!(board.unplaced_tasks().len(), 1);
        assert_eq!(board.search_tasks("limbo").len(), 1);
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_move_task_success_rewrites_status() {
        let mut board = sample_board();
        assert!(board.move_task("t1", "col-todo", "col-doing"));
        assert!(!board.get_column("col-todo").unwrap().contains("t1"));
        assert_eq!(
            board.get_column("col-doing").unwrap().task_ids,
            vec!["t2", "t1"]
        );
        assert_eq!(board.tasks.get("t1").unwrap().status, "doing");
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_move_task_failures_leave_state_unchanged() {
        let mut board = sample_board();
        let snapshot = board.clone();

        // Unknown destination.
        assert!(!board.move_task("t1", "col-todo", "col-nope"));
        // Unknown source.
        assert!(!board.move_task("t1", "col-nope", "col-doing"));
        // Task not in the named source column.
        assert!(!board.move_task("t3", "col-todo", "col-doing"));

        for (a, b) in board.columns.iter().zip(snapshot.columns.iter()) {
            assert_eq!(a.task_ids, b.task_ids);
        }
        assert_eq!(
            board.tasks.get("t1").unwrap().status,
            snapshot.tasks.get("t1").unwrap().status
        );
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_move_task_within_same_column() {
        let mut board = sample_board();
        board.add_task(record("t4", "Another todo", "todo"));
        assert!(board.move_task("t1", "col-todo", "col-todo"));
        // Re-adding appends, so the task moves to the back of its column.
        assert_eq!(
            board.get_column("col-todo").unwrap().task_ids,
            vec!["t4", "t1"]
        );
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_remove_column_orphans_tasks() {
        let mut board = sample_board();
        assert!(board.remove_column("col-doing"));
        assert!(!board.remove_column("col-doing"));

        // t2 survives in the registry but is no longer placed anywhere.
        assert!(board.tasks.get("t2").is_some());
        let unplaced = board.unplaced_tasks();
        assert_eq!(unplaced.len(), 1);
        assert_eq!(unplaced[0].id, "t2");
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_complete_task_rehomes_to_done_column() {
        let mut board = sample_board();
        assert!(board.complete_task("t1"));

        let task = board.tasks.get("t1").unwrap();
        assert_eq!(task.status, DONE_STATUS);
        assert!(task.verified);
        assert_eq!(task.progress, 100);
        assert!(board.get_column("col-done").unwrap().contains("t1"));
        assert!(!board.get_column("col-todo").unwrap().contains("t1"));
        assert_partition_invariant(&board);

        assert!(!board.complete_task("ghost"));
    }

    #[test]
    fn test_complete_task_without_done_column_unplaces() {
        let mut board = KanbanBoard::new();
        board.initialize(
            vec![ColumnConfig::new("col-todo", "To Do", "todo")],
            vec![record("t1", "Lonely", "todo")],
        );
        assert!(board.complete_task("t1"));
        assert_eq!(board.unplaced_tasks().len(), 1);
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_delete_task_clears_membership() {
        let mut board = sample_board();
        assert!(board.delete_task("t2"));
        assert!(board.tasks.get("t2").is_none());
        assert!(!board.get_column("col-doing").unwrap().contains("t2"));
        assert!(!board.delete_task("t2"));
        assert_partition_invariant(&board);
    }

    #[test]
    fn test_invariant_survives_operation_sequence() {
        let mut board = sample_board();
        board.add_column(ColumnConfig::new("col-review", "Review", "review"));
        board.add_task(record("t5", "Audit deps", "review"));
        assert!(board.move_task("t5", "col-review", "col-todo"));
        assert!(board.move_task("t2", "col-doing", "col-review"));
        assert!(board.remove_column("col-doing"));
        assert!(board.complete_task("t5"));
        assert!(board.delete_task("t3"));
        assert_partition_invariant(&board);
    }
}
