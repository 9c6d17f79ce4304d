//! Dashboard view model: an owner's tasks, their counts and a pep talk

use crate::error::Result;
use crate::motivation::{random_motivation, Motivation};
use crate::storage::TaskStore;
use crate::types::{Task, TaskFilter, TaskStats};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub owner: String,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub motivation: Motivation,
}

impl Dashboard {
    pub async fn build<S, R>(store: &S, owner: &str, rng: &mut R) -> Result<Self>
    where
        S: TaskStore + ?Sized,
        R: Rng + ?Sized,
    {
        let tasks = store.list_tasks(owner, TaskFilter::All).await?;
        let stats = TaskStats::from_tasks(&tasks);
        debug!(
            "Dashboard for {}: {} tasks ({} done)",
            owner, stats.total, stats.done
        );

        Ok(Self {
            owner: owner.to_string(),
            tasks,
            stats,
            motivation: *random_motivation(rng),
        })
    }

    /// Tasks not yet completed, in listing order
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_completed)
    }
}
