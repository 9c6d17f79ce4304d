//! Shared helpers for CLI commands

use anyhow::{Context as _, Result};
use kalma_core::{ConnectionMode, KalmaConfig, LibsqlStorage, Task, TaskId};
use std::path::PathBuf;
use tracing::debug;

/// Resolved settings every command runs with
pub struct Context {
    pub owner: String,
    pub db_path: PathBuf,
}

impl Context {
    /// Merge CLI overrides on top of the loaded configuration
    pub fn new(config: &KalmaConfig, cli_db_path: Option<&str>, cli_owner: Option<String>) -> Self {
        let owner = cli_owner
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| config.owner.clone());
        let db_path = config.db_path(cli_db_path);
        debug!("Owner: {}, database: {}", owner, db_path.display());

        Self { owner, db_path }
    }

    /// Open the task database
    ///
    /// Commands that write may create the database; read-only commands
    /// require it to exist already.
    pub async fn open_storage(&self, create_if_missing: bool) -> Result<LibsqlStorage> {
        let path = self.db_path.to_string_lossy().to_string();
        LibsqlStorage::new_with_validation(ConnectionMode::Local(path.clone()), create_if_missing)
            .await
            .with_context(|| format!("Failed to open task database at {}", path))
    }
}

/// Parse a task ID argument
pub fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_string(raw).with_context(|| format!("'{}' is not a task ID", raw))
}

/// One-line human-readable task summary
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.is_completed { "x" } else { " " };
    let mut line = format!("[{}] {}  {}", mark, task.id, task.title);
    if !task.category.is_empty() {
        line.push_str(&format!("  #{}", task.category));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!("  (due {})", due.format("%Y-%m-%d")));
    }
    line
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
