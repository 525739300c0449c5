//! Board-definition file handling.
//!
//! A board file is a JSON document with the column definitions and the
//! initial batch of task records. It is read once at startup to seed the
//! in-memory board; nothing is ever written back.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::KanbanBoard;
use crate::column::ColumnConfig;
use crate::fields::{Assignee, Priority, DONE_STATUS};
use crate::task::Task;

/// Contents of a board-definition file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BoardFile {
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardFile {
    /// Load a board definition, falling back to the built-in sample board
    /// when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return sample_board();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("Error parsing board file, using sample board: {e}");
                    sample_board()
                }
            },
            Err(e) => {
                eprintln!("Error reading board file, using sample board: {e}");
                sample_board()
            }
        }
    }

    /// Build the live board from this definition.
    ///
    /// Task records whose status matches no column are registered but left
    /// off the board; their ids come back so the caller can warn.
    pub fn into_board(self) -> (KanbanBoard, Vec<String>) {
        let mut board = KanbanBoard::new();
        let unplaced = board.initialize(self.columns, self.tasks);
        (board, unplaced)
    }
}

/// Derive a column id/status slug from a display title.
/// Lowercases and joins alphanumeric runs with hyphens.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// The board shown when no board file is given: four columns and a handful
/// of cards so every interaction has something to act on.
pub fn sample_board() -> BoardFile {
    let mut columns = vec![
        ColumnConfig::new("col-todo", "To Do", "todo"),
        ColumnConfig::new("col-progress", "In Progress", "in-progress"),
        ColumnConfig::new("col-review", "Review", "review"),
        ColumnConfig::new("col-done", "Done", DONE_STATUS),
    ];
    columns[0].accent_color = "blue".into();
    columns[0].show_add_button = true;
    columns[1].accent_color = "yellow".into();
    columns[1].is_active_column = true;
    columns[2].accent_color = "magenta".into();
    columns[3].accent_color = "green".into();

    let task = |id: &str, title: &str, desc: &str, status: &str, priority: Priority| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: desc.to_string(),
        priority,
        status: status.to_string(),
        assignees: vec![Assignee::named("you")],
        date: None,
        comments: 0,
        attachments: 0,
        progress: 0,
        verified: false,
    };

    BoardFile {
        columns,
        tasks: vec![
            task(
                "task-1",
                "Sketch the landing page",
                "Rough layout for the hero and pricing sections",
                "todo",
                Priority::Medium,
            ),
            task(
                "task-2",
                "Fix login redirect",
                "Users land on a blank page after OAuth",
                "in-progress",
                Priority::High,
            ),
            task(
                "task-3",
                "Review API pagination",
                "Check cursor handling on large result sets",
                "review",
                Priority::Low,
            ),
            task(
                "task-4",
                "Ship v0.3",
                "Tag, changelog, announce",
                DONE_STATUS,
                Priority::Medium,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_board_places_every_task() {
        let (board, unplaced) = sample_board().into_board();
        assert!(unplaced.is_empty());
        assert_eq!(board.columns.len(), 4);
        assert_eq!(board.tasks.len(), 4);
        for column in &board.columns {
            assert_eq!(column.task_count(), 1);
        }
    }

    #[test]
    fn test_parse_board_file() {
        let file: BoardFile = serde_json::from_str(
            r#"{
                "columns": [
                    {"id": "c1", "title": "Backlog", "status": "backlog", "accent_color": "cyan"},
                    {"id": "c2", "title": "Done", "status": "done"}
                ],
                "tasks": [
                    {"id": "t1", "title": "First", "status": "backlog", "priority": "high"},
                    {"id": "t2", "title": "Stray", "status": "elsewhere"}
                ]
            }"#,
        )
        .unwrap();
        let (board, unplaced) = file.into_board();
        assert_eq!(board.get_column("c1").unwrap().accent_color, "cyan");
        assert_eq!(board.get_column("c1").unwrap().task_ids, vec!["t1"]);
        assert_eq!(unplaced, vec!["t2"]);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("In Progress"), "in-progress");
        assert_eq!(slugify("  QA / Verify  "), "qa-verify");
        assert_eq!(slugify("Done!"), "done");
        assert_eq!(slugify(""), "");
    }
}
