//! Field types shared across the task model.
//!
//! Statuses are deliberately open strings: they name board columns, and
//! columns are user-defined. Only the completion sentinel is fixed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Status a task adopts when it is marked complete.
pub const DONE_STATUS: &str = "done";

/// Task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A person assigned to a task, with an avatar reference for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignee {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl Assignee {
    /// Create an assignee with no avatar reference.
    pub fn named(name: &str) -> Self {
        Assignee {
            name: name.to_string(),
            avatar: String::new(),
        }
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}
