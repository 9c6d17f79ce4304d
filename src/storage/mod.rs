//! Storage layer for tasks
//!
//! [`TaskStore`] is the persistence interface; [`libsql::LibsqlStorage`] is the
//! only backend. Schema changes ship as versioned migrations applied on open.

pub mod libsql;

use crate::error::Result;
use crate::types::{Task, TaskFilter, TaskId, TaskStats, TaskUpdate};
use async_trait::async_trait;

/// Storage backend trait defining all task operations
///
/// Every operation is scoped to `owner`. Referencing a task that does not
/// exist, or that belongs to a different owner, fails with
/// [`crate::KalmaError::TaskNotFound`].
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Store a new task
    async fn create_task(&self, task: &Task) -> Result<()>;

    /// Retrieve a task by ID
    async fn get_task(&self, owner: &str, id: TaskId) -> Result<Task>;

    /// List an owner's tasks, oldest first
    async fn list_tasks(&self, owner: &str, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Edit title/category/due date and return the updated task
    async fn update_task(&self, owner: &str, id: TaskId, update: &TaskUpdate) -> Result<Task>;

    /// Mark a task completed (idempotent)
    async fn complete_task(&self, owner: &str, id: TaskId) -> Result<()>;

    /// Permanently delete a task
    async fn delete_task(&self, owner: &str, id: TaskId) -> Result<()>;

    /// Total/done/pending counts for an owner
    async fn task_stats(&self, owner: &str) -> Result<TaskStats>;
}
