use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal kanban board.
/// The board definition defaults to ./board.json; without one, a built-in
/// sample board is used.
#[derive(Parser)]
#[command(name = "kanban", version, about = "Terminal kanban board")]
pub struct Cli {
    /// Path to the JSON board-definition file.
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
