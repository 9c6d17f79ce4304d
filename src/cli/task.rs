//! Task management commands

use clap::Subcommand;
use anyhow::{bail, Result};
use kalma_core::{
    types::parse_due_date,
    TaskDraft, TaskFilter, TaskStore, TaskUpdate,
};
use tracing::debug;

use super::helpers::{format_task_line, parse_task_id, print_json, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Category label
        #[arg(short, long, default_value = "")]
        category: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },

    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only completed tasks
        #[arg(long)]
        done: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Edit a task
    Edit {
        /// Task ID
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// New due date (YYYY-MM-DD); an empty value clears it
        #[arg(short, long)]
        due: Option<String>,
    },

    /// Mark a task completed
    Done {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

/// Handle task subcommands
pub async fn handle(action: TaskAction, ctx: &Context) -> Result<()> {
    match action {
        TaskAction::Add {
            title,
            category,
            due,
        } => {
            let due_date = match due {
                Some(raw) => parse_due_date(&raw)?,
                None => None,
            };
            let task = TaskDraft::new(title)
                .with_category(category)
                .with_due_date(due_date)
                .into_task(&ctx.owner)?;

            let storage = ctx.open_storage(true).await?;
            storage.create_task(&task).await?;
            debug!("Added task {} for {}", task.id, ctx.owner);

            println!("✓ Added: {}", format_task_line(&task));
            Ok(())
        }
        TaskAction::List {
            pending,
            done,
            json,
        } => {
            let filter = match (pending, done) {
                (true, _) => TaskFilter::Pending,
                (_, true) => TaskFilter::Completed,
                _ => TaskFilter::All,
            };

            let storage = ctx.open_storage(false).await?;
            let tasks = storage.list_tasks(&ctx.owner, filter).await?;

            if json {
                return print_json(&tasks);
            }

            if tasks.is_empty() {
                println!("No tasks.");
            }
            for task in &tasks {
                println!("{}", format_task_line(task));
            }
            Ok(())
        }
        TaskAction::Edit {
            id,
            title,
            category,
            due,
        } => {
            let id = parse_task_id(&id)?;
            let update = TaskUpdate {
                title,
                category,
                due_date: due.as_deref().map(parse_due_date).transpose()?,
            };
            if update.is_empty() {
                bail!("Nothing to change: pass --title, --category or --due");
            }

            let storage = ctx.open_storage(false).await?;
            let task = storage.update_task(&ctx.owner, id, &update).await?;

            println!("✓ Updated: {}", format_task_line(&task));
            Ok(())
        }
        TaskAction::Done { id } => {
            let id = parse_task_id(&id)?;
            let storage = ctx.open_storage(false).await?;
            storage.complete_task(&ctx.owner, id).await?;

            println!("✓ Completed: {}", id);
            Ok(())
        }
        TaskAction::Delete { id } => {
            let id = parse_task_id(&id)?;
            let storage = ctx.open_storage(false).await?;
            storage.delete_task(&ctx.owner, id).await?;

            println!("✓ Deleted: {}", id);
            Ok(())
        }
    }
}
