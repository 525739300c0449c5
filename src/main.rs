//! # Kanban - Terminal Kanban Board
//!
//! A kanban board that lives in your terminal: columns hold task cards, and
//! you create, edit, move, complete and search them through an interactive
//! TUI or quick read-only CLI commands.
//!
//! ## Key Features
//!
//! - **Column Board**: user-defined columns, each tied to a status; a card
//!   moved into a column adopts that column's status
//! - **Rich Cards**: priority, assignees, due date, progress, comment and
//!   attachment counts, verification flag
//! - **Live Search**: case-insensitive search over titles and descriptions,
//!   covering cards not currently placed in any column
//! - **Board Files**: seed the board from a JSON definition of columns and
//!   tasks; without one, a built-in sample board is used
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board (sample board if no ./board.json)
//! kanban
//!
//! # Use a specific board definition
//! kanban --board sprint.json
//!
//! # Print the board as a table
//! kanban show
//!
//! # Search across every card
//! kanban search "login"
//! ```
//!
//! The board is held in memory for the session; the definition file is
//! never written back.

use std::path::PathBuf;

use clap::Parser;

pub mod board;
pub mod boardfile;
pub mod cli;
pub mod cmd;
pub mod column;
pub mod fields;
pub mod list;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use boardfile::BoardFile;
use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    // Completions need no board at all.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let board_path = cli
        .board
        .unwrap_or_else(|| PathBuf::from("board.json"));

    let (board, unplaced) = BoardFile::load(&board_path).into_board();
    if !unplaced.is_empty() {
        eprintln!(
            "Warning: {} task(s) match no column and are not shown on the board: {}",
            unplaced.len(),
            unplaced.join(", ")
        );
    }

    match cli.command {
        None | Some(Commands::Ui) => cmd_ui(board),
        Some(Commands::Show {
            column,
            status,
            unplaced,
        }) => cmd_show(&board, column, status, unplaced),
        Some(Commands::Search { query }) => cmd_search(&board, &query),
        Some(Commands::Columns) => cmd_columns(&board),
        Some(Commands::Completions { .. }) => unreachable!("completions handled above"),
    }
}
