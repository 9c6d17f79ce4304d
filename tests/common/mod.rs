//! Common test utilities and helpers

#![allow(dead_code)]

use kalma_core::{ConnectionMode, LibsqlStorage, Task, TaskDraft, TaskStore};
use tempfile::TempDir;

/// Storage backed by a database file inside a temporary directory
///
/// Keep the returned `TempDir` alive for as long as the storage is used.
pub async fn create_test_storage() -> (LibsqlStorage, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("kalma_test.db");
    let storage = LibsqlStorage::new_with_validation(
        ConnectionMode::Local(path.to_string_lossy().to_string()),
        true,
    )
    .await
    .expect("Failed to create test storage");

    (storage, dir)
}

/// Create and store a task with the given title
pub async fn add_task(storage: &LibsqlStorage, owner: &str, title: &str) -> Task {
    let task = TaskDraft::new(title)
        .into_task(owner)
        .expect("Failed to build task");
    storage
        .create_task(&task)
        .await
        .expect("Failed to store task");
    task
}
