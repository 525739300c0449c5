//! Command implementations for the CLI interface.
//!
//! This module contains the handlers behind each subcommand: launching the
//! TUI, printing the board as a table, searching, and listing columns.
//! The board is loaded fresh from the definition file for every invocation;
//! mutation happens in the TUI session.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::Local;

use crate::board::KanbanBoard;
use crate::fields::format_priority;
use crate::list::{format_date_relative, truncate};
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board interface (the default).
    Ui,

    /// Print the board as a table.
    Show {
        /// Only show tasks in this column (by column id).
        #[arg(long)]
        column: Option<String>,
        /// Only show tasks with this status.
        #[arg(long)]
        status: Option<String>,
        /// Include tasks not placed in any column.
        #[arg(long)]
        unplaced: bool,
    },

    /// Search tasks by title or description (case-insensitive substring).
    Search {
        /// Free-text query. Empty matches everything.
        query: String,
    },

    /// List columns with their task counts.
    Columns,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the TUI on the given board.
pub fn cmd_ui(board: KanbanBoard) {
    if let Err(e) = run_tui(board) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print the board as a table, optionally filtered.
pub fn cmd_show(
    board: &KanbanBoard,
    column: Option<String>,
    status: Option<String>,
    unplaced: bool,
) {
    if unplaced {
        print_table(board, &board.unplaced_tasks());
        return;
    }
    if let Some(column_id) = column {
        let Some(col) = board.get_column(&column_id) else {
            eprintln!("No column with id '{column_id}'");
            std::process::exit(1);
        };
        let tasks: Vec<&Task> = col
            .task_ids
            .iter()
            .filter_map(|id| board.tasks.get(id))
            .collect();
        print_table(board, &tasks);
        return;
    }
    if let Some(status) = status {
        print_table(board, &board.tasks.get_by_status(&status));
        return;
    }

    // Whole board, column by column in display order.
    if board.tasks.is_empty() {
        println!("Board is empty");
        return;
    }
    let mut tasks: Vec<&Task> = Vec::new();
    for col in &board.columns {
        tasks.extend(col.task_ids.iter().filter_map(|id| board.tasks.get(id)));
    }
    print_table(board, &tasks);

    let stray = board.unplaced_tasks();
    if !stray.is_empty() {
        println!("({} unplaced; use --unplaced to list)", stray.len());
    }
}

/// Search the whole task population and print matches.
pub fn cmd_search(board: &KanbanBoard, query: &str) {
    let matches = board.search_tasks(query);
    if matches.is_empty() {
        println!("No tasks match '{query}'");
        return;
    }
    print_table(board, &matches);
}

/// Print every column with its status and task count.
pub fn cmd_columns(board: &KanbanBoard) {
    println!("{:<14} {:<18} {:<14} {}", "ID", "Title", "Status", "Tasks");
    for col in &board.columns {
        println!(
            "{:<14} {:<18} {:<14} {}",
            col.id,
            truncate(&col.title, 18),
            col.status,
            col.task_count()
        );
    }
}

/// Generate shell completions for the CLI.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print tasks in a formatted table.
fn print_table(board: &KanbanBoard, tasks: &[&Task]) {
    println!(
        "{:<10} {:<14} {:<7} {:<10} {:<5} {}",
        "ID", "Column", "Pri", "Date", "Prog", "Title [assignees]"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let column = board
            .column_of(&t.id)
            .map(|c| c.title.as_str())
            .unwrap_or("-");
        let assignees = if t.assignees.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = t.assignees.iter().map(|a| a.name.as_str()).collect();
            format!(" [{}]", names.join(","))
        };
        println!(
            "{:<10} {:<14} {:<7} {:<10} {:<5} {}{}",
            truncate(&t.id, 10),
            truncate(column, 14),
            format_priority(t.priority),
            format_date_relative(t.date, today),
            format!("{}%", t.progress),
            t.title,
            assignees
        );
    }
}
