//! Kalma - personal task tracking and mood self-assessment
//!
//! - **Mood**: scores a short questionnaire into one of four fixed moods
//! - **Types**: tasks, edits, filters and counts
//! - **Storage**: the [`TaskStore`] interface and its libSQL backend
//! - **Dashboard**: an owner's tasks, counts and a motivational message
//!
//! # Example
//!
//! ```ignore
//! use kalma_core::{mood, LibsqlStorage, TaskDraft, TaskStore};
//!
//! let result = mood::score(Some("8"), Some("8"), Some("2"), Some("1"));
//! assert_eq!(result.mood, mood::Mood::Anxious);
//!
//! let storage = LibsqlStorage::in_memory().await?;
//! let task = TaskDraft::new("Go for a walk").into_task("alice")?;
//! storage.create_task(&task).await?;
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod mood;
pub mod motivation;
pub mod storage;
pub mod types;

pub use config::KalmaConfig;
pub use dashboard::Dashboard;
pub use error::{KalmaError, Result};
pub use mood::{Assessment, AssessmentForm, Mood, MoodClassification};
pub use motivation::{random_motivation, Motivation};
pub use storage::libsql::{ConnectionMode, LibsqlStorage};
pub use storage::TaskStore;
pub use types::{Task, TaskDraft, TaskFilter, TaskId, TaskStats, TaskUpdate};
