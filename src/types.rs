//! Core data types for task tracking
//!
//! Tasks are partitioned by `owner`; every storage operation is scoped to a
//! single owner so one profile can never read or modify another's tasks.

use crate::error::{KalmaError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a new random task ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// A personal task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner: String,
    pub title: String,
    /// Free-form grouping label ("work", "health", ...)
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when adding a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }

    /// Validate and turn the draft into a fresh, incomplete task
    pub fn into_task(self, owner: &str) -> Result<Task> {
        self.validate()?;
        let now = Utc::now();
        Ok(Task {
            id: TaskId::new(),
            owner: owner.to_string(),
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            due_date: self.due_date,
            is_completed: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial edit of a task; `None` leaves a field unchanged
///
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.due_date.is_none()
    }

    /// Apply the edit in place, bumping `updated_at`
    pub fn apply(&self, task: &mut Task) -> Result<()> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
            task.title = title.trim().to_string();
        }
        if let Some(ref category) = self.category {
            task.category = category.trim().to_string();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        task.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(KalmaError::InvalidInput(
            "Task title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parse a user-supplied due date
///
/// An empty value means "no due date"; anything else must be `YYYY-MM-DD`.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| KalmaError::InvalidInput(format!("Invalid due date '{}': {}", raw, e)))
}

/// Which tasks to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.is_completed,
            TaskFilter::Completed => task.is_completed,
        }
    }
}

/// Task counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn new(total: usize, done: usize) -> Self {
        Self {
            total,
            done,
            pending: total.saturating_sub(done),
        }
    }

    pub fn from_tasks(tasks: &[Task]) -> Self {
        let done = tasks.iter().filter(|t| t.is_completed).count();
        Self::new(tasks.len(), done)
    }

    /// Share of completed tasks in `[0.0, 1.0]`; zero when there are none
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(done: bool) -> Task {
        let mut task = TaskDraft::new("write tests").into_task("alice").unwrap();
        task.is_completed = done;
        task
    }

    #[test]
    fn test_task_id_parse() {
        let id = TaskId::new();
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(TaskId::from_string("nope").is_err());
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let err = TaskDraft::new("   ").into_task("alice").unwrap_err();
        assert!(matches!(err, KalmaError::InvalidInput(_)));
    }

    #[test]
    fn test_draft_trims_fields() {
        let task = TaskDraft::new("  Call mom ")
            .with_category(" family ")
            .into_task("alice")
            .unwrap();
        assert_eq!(task.title, "Call mom");
        assert_eq!(task.category, "family");
        assert_eq!(task.owner, "alice");
        assert!(!task.is_completed);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_update_apply() {
        let mut t = task(false);
        t.due_date = parse_due_date("2026-01-02").unwrap();

        let update = TaskUpdate {
            title: Some("Renamed".to_string()),
            category: None,
            due_date: Some(None),
        };
        update.apply(&mut t).unwrap();
        assert_eq!(t.title, "Renamed");
        assert_eq!(t.due_date, None);
        assert!(t.updated_at >= t.created_at);

        let blank = TaskUpdate {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(blank.apply(&mut t).is_err());
        assert!(TaskUpdate::default().is_empty());
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(
            parse_due_date("2026-10-17").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 17)
        );
        assert!(parse_due_date("17/10/2026").is_err());
    }

    #[test]
    fn test_stats() {
        let tasks = vec![task(true), task(false), task(false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats, TaskStats { total: 3, done: 1, pending: 2 });
        assert!((stats.completion_ratio() - 1.0 / 3.0).abs() < f64::EPSILON);

        let empty = TaskStats::from_tasks(&[]);
        assert_eq!(empty, TaskStats::default());
        assert_eq!(empty.completion_ratio(), 0.0);
    }

    #[test]
    fn test_filter() {
        assert!(TaskFilter::All.matches(&task(true)));
        assert!(TaskFilter::Pending.matches(&task(false)));
        assert!(!TaskFilter::Pending.matches(&task(true)));
        assert!(TaskFilter::Completed.matches(&task(true)));
    }
}
