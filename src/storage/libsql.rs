//! LibSQL storage backend implementation
//!
//! Tasks live in a single local libSQL/SQLite database. The schema is created
//! and evolved only through the versioned migrations embedded below; opening
//! a database applies any that are still pending.

use crate::error::{KalmaError, Result};
use crate::storage::TaskStore;
use crate::types::{Task, TaskFilter, TaskId, TaskStats, TaskUpdate};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use libsql::{params, Builder, Connection, Database, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Versioned schema migrations, applied in order and recorded once applied
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_tasks.sql",
        include_str!("../../migrations/libsql/001_create_tasks.sql"),
    ),
    (
        "002_add_task_indexes.sql",
        include_str!("../../migrations/libsql/002_add_task_indexes.sql"),
    ),
];

const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

const TASK_COLUMNS: &str =
    "id, owner, title, category, due_date, is_completed, created_at, updated_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse SQL file into individual statements, handling multi-line constructs like triggers
fn parse_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0; // BEGIN/END nesting

    for line in sql.lines() {
        let trimmed = line.trim();

        if current.is_empty() && (trimmed.is_empty() || trimmed.starts_with("--")) {
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        let upper = trimmed.to_uppercase();
        if upper.starts_with("BEGIN") || upper.contains(" BEGIN") {
            depth += 1;
        }
        if upper.starts_with("END") {
            depth = depth.saturating_sub(1);
        }

        if trimmed.ends_with(';') && depth == 0 {
            statements.push(std::mem::take(&mut current));
        }
    }

    if !current.trim().is_empty() {
        statements.push(current);
    }

    statements
}

/// Database connection mode
#[derive(Debug, Clone)]
pub enum ConnectionMode {
    /// Local file-based database
    Local(String),
    /// In-memory database (for testing)
    InMemory,
}

/// LibSQL storage backend
///
/// Holds one connection for its lifetime; libSQL's `:memory:` databases are
/// private to the connection that created them.
pub struct LibsqlStorage {
    _db: Database,
    conn: Connection,
}

impl LibsqlStorage {
    /// Validate database file before opening
    ///
    /// Returns `Ok(false)` when the file is absent and `must_exist` is false,
    /// `Ok(true)` when it exists and carries a SQLite header. An empty file
    /// only passes when `must_exist` is false.
    fn validate_database_file(db_path: &str, must_exist: bool) -> Result<bool> {
        let path = Path::new(db_path);

        if !path.exists() {
            if must_exist {
                return Err(KalmaError::Database(format!(
                    "Database file not found at '{}'. Run 'kalma init' first or check KALMA_DB_PATH.",
                    db_path
                )));
            }
            return Ok(false);
        }

        let mut file = File::open(path).map_err(|e| {
            KalmaError::Database(format!("Cannot read database file at '{}': {}", db_path, e))
        })?;
        let len = file.metadata()?.len();

        // An empty file has never been initialized
        if len == 0 {
            if must_exist {
                return Err(KalmaError::Database(format!(
                    "Database file at '{}' is empty. Run 'kalma init' first.",
                    db_path
                )));
            }
            return Ok(true);
        }

        let mut header = [0u8; 16];
        if len < 16 || file.read_exact(&mut header).is_err() || header != *SQLITE_HEADER {
            return Err(KalmaError::Database(format!(
                "Database file at '{}' is corrupted or not a valid SQLite database.",
                db_path
            )));
        }

        debug!("Database file validation passed: {}", db_path);
        Ok(true)
    }

    /// Open a database, optionally creating it, and apply pending migrations
    ///
    /// # Example
    /// ```ignore
    /// let storage = LibsqlStorage::new_with_validation(ConnectionMode::Local("kalma.db".into()), true).await?;
    /// ```
    pub async fn new_with_validation(mode: ConnectionMode, create_if_missing: bool) -> Result<Self> {
        info!(
            "Connecting to LibSQL database: {:?} (create_if_missing: {})",
            mode, create_if_missing
        );

        let db = match mode {
            ConnectionMode::Local(ref path) => {
                let exists = Self::validate_database_file(path, !create_if_missing)?;

                if create_if_missing && !exists {
                    if let Some(parent) = Path::new(path).parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent).map_err(|e| {
                                KalmaError::Database(format!(
                                    "Failed to create database directory {}: {}",
                                    parent.display(),
                                    e
                                ))
                            })?;
                        }
                    }
                }

                Builder::new_local(path).build().await.map_err(|e| {
                    KalmaError::Database(format!("Failed to create local database: {}", e))
                })?
            }
            ConnectionMode::InMemory => Builder::new_local(":memory:")
                .build()
                .await
                .map_err(|e| {
                    KalmaError::Database(format!("Failed to create in-memory database: {}", e))
                })?,
        };

        let conn = db
            .connect()
            .map_err(|e| KalmaError::Database(format!("Failed to get connection: {}", e)))?;

        info!("LibSQL database connection established");

        let storage = Self { _db: db, conn };
        storage.check_database_health().await?;
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Open an existing database; fails if it has not been initialized
    pub async fn new(mode: ConnectionMode) -> Result<Self> {
        Self::new_with_validation(mode, false).await
    }

    /// Open a throwaway in-memory database
    pub async fn in_memory() -> Result<Self> {
        Self::new_with_validation(ConnectionMode::InMemory, true).await
    }

    /// Check the connection answers queries and the database is writable
    pub async fn check_database_health(&self) -> Result<()> {
        self.conn.query("SELECT 1", ()).await.map_err(|e| {
            KalmaError::Database(format!(
                "Database corruption detected or invalid database file: {}",
                e
            ))
        })?;

        let write_test = r#"
            CREATE TABLE IF NOT EXISTS _health_check (id INTEGER PRIMARY KEY);
            DROP TABLE IF EXISTS _health_check;
        "#;

        if let Err(e) = self.conn.execute_batch(write_test).await {
            let error_msg = e.to_string().to_lowercase();
            if error_msg.contains("readonly") || error_msg.contains("permission") {
                return Err(KalmaError::Database(format!(
                    "Database is read-only or lacks write permissions: {}",
                    e
                )));
            }
            return Err(KalmaError::Database(format!(
                "Database write test failed: {}",
                e
            )));
        }

        debug!("Database health check passed");
        Ok(())
    }

    /// Apply pending migrations in order
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS _migrations_applied (
                    migration_name TEXT PRIMARY KEY,
                    applied_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| {
                KalmaError::Migration(format!("Failed to create migrations table: {}", e))
            })?;

        for (name, sql) in MIGRATIONS {
            let mut rows = self
                .conn
                .query(
                    "SELECT COUNT(*) FROM _migrations_applied WHERE migration_name = ?",
                    params![*name],
                )
                .await?;

            let already_applied = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };

            if already_applied > 0 {
                debug!("Skipping already applied migration: {}", name);
                continue;
            }

            let statements = parse_sql_statements(sql);
            debug!("Parsed {} statements from {}", statements.len(), name);

            for (i, statement) in statements.iter().enumerate() {
                let statement = statement.trim();
                if statement.is_empty() {
                    continue;
                }
                self.conn.execute(statement, ()).await.map_err(|e| {
                    KalmaError::Migration(format!(
                        "Failed to execute statement #{} in {}: {}",
                        i + 1,
                        name,
                        e
                    ))
                })?;
            }

            self.conn
                .execute(
                    "INSERT INTO _migrations_applied (migration_name, applied_at) VALUES (?, ?)",
                    params![*name, Utc::now().timestamp()],
                )
                .await
                .map_err(|e| KalmaError::Migration(format!("Failed to record migration: {}", e)))?;

            info!("Executed migration: {}", name);
        }

        info!("Database migrations completed");
        Ok(())
    }

    /// Names of applied migrations, in application order
    pub async fn applied_migrations(&self) -> Result<Vec<String>> {
        let mut rows = self
            .conn
            .query(
                "SELECT migration_name FROM _migrations_applied ORDER BY migration_name",
                (),
            )
            .await?;

        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    async fn fetch_task(&self, owner: &str, id: TaskId) -> Result<Task> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ? AND owner = ?", TASK_COLUMNS);
        let mut rows = self
            .conn
            .query(&sql, params![id.to_string(), owner])
            .await?;

        let row = rows
            .next()
            .await?
            .ok_or_else(|| KalmaError::TaskNotFound(id.to_string()))?;

        row_to_task(&row)
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| KalmaError::Other(format!("Invalid timestamp: {}", e)))
}

fn due_date_value(due_date: Option<NaiveDate>) -> Value {
    match due_date {
        Some(date) => Value::Text(date.format(DATE_FORMAT).to_string()),
        None => Value::Null,
    }
}

fn row_to_task(row: &libsql::Row) -> Result<Task> {
    let id_str: String = row.get(0)?;
    let id = TaskId::from_string(&id_str)?;

    let due_date = match row.get_value(4)? {
        Value::Text(raw) if !raw.is_empty() => Some(
            NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|e| KalmaError::Other(format!("Invalid due date: {}", e)))?,
        ),
        _ => None,
    };

    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Task {
        id,
        owner: row.get(1)?,
        title: row.get(2)?,
        category: row.get(3)?,
        due_date,
        is_completed: row.get::<i64>(5)? != 0,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl TaskStore for LibsqlStorage {
    async fn create_task(&self, task: &Task) -> Result<()> {
        debug!("Storing task: {}", task.id);

        self.conn
            .execute(
                r#"
                INSERT INTO tasks (
                    id, owner, title, category, due_date,
                    is_completed, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    task.id.to_string(),
                    task.owner.clone(),
                    task.title.clone(),
                    task.category.clone(),
                    due_date_value(task.due_date),
                    task.is_completed as i64,
                    format_timestamp(&task.created_at),
                    format_timestamp(&task.updated_at),
                ],
            )
            .await?;

        Ok(())
    }

    async fn get_task(&self, owner: &str, id: TaskId) -> Result<Task> {
        debug!("Fetching task: {}", id);
        self.fetch_task(owner, id).await
    }

    async fn list_tasks(&self, owner: &str, filter: TaskFilter) -> Result<Vec<Task>> {
        let condition = match filter {
            TaskFilter::All => "",
            TaskFilter::Pending => " AND is_completed = 0",
            TaskFilter::Completed => " AND is_completed = 1",
        };
        let sql = format!(
            "SELECT {} FROM tasks WHERE owner = ?{} ORDER BY created_at ASC, rowid ASC",
            TASK_COLUMNS, condition
        );

        let mut rows = self.conn.query(&sql, params![owner]).await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }

        debug!("Listed {} tasks for {} ({:?})", tasks.len(), owner, filter);
        Ok(tasks)
    }

    async fn update_task(&self, owner: &str, id: TaskId, update: &TaskUpdate) -> Result<Task> {
        debug!("Updating task: {}", id);

        let mut task = self.fetch_task(owner, id).await?;
        update.apply(&mut task)?;

        let changed = self
            .conn
            .execute(
                r#"
                UPDATE tasks SET
                    title = ?,
                    category = ?,
                    due_date = ?,
                    updated_at = ?
                WHERE id = ? AND owner = ?
                "#,
                params![
                    task.title.clone(),
                    task.category.clone(),
                    due_date_value(task.due_date),
                    format_timestamp(&task.updated_at),
                    id.to_string(),
                    owner,
                ],
            )
            .await?;

        if changed == 0 {
            return Err(KalmaError::TaskNotFound(id.to_string()));
        }

        Ok(task)
    }

    async fn complete_task(&self, owner: &str, id: TaskId) -> Result<()> {
        debug!("Completing task: {}", id);

        let changed = self
            .conn
            .execute(
                r#"
                UPDATE tasks
                SET is_completed = 1, updated_at = ?
                WHERE id = ? AND owner = ?
                "#,
                params![format_timestamp(&Utc::now()), id.to_string(), owner],
            )
            .await?;

        if changed == 0 {
            return Err(KalmaError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_task(&self, owner: &str, id: TaskId) -> Result<()> {
        debug!("Deleting task: {}", id);

        let changed = self
            .conn
            .execute(
                "DELETE FROM tasks WHERE id = ? AND owner = ?",
                params![id.to_string(), owner],
            )
            .await?;

        if changed == 0 {
            return Err(KalmaError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn task_stats(&self, owner: &str) -> Result<TaskStats> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*), COALESCE(SUM(is_completed), 0) FROM tasks WHERE owner = ?",
                params![owner],
            )
            .await?;

        match rows.next().await? {
            Some(row) => {
                let total: i64 = row.get(0)?;
                let done: i64 = row.get(1)?;
                Ok(TaskStats::new(total as usize, done as usize))
            }
            None => Ok(TaskStats::default()),
        }
    }
}
