//! Error types for Kalma
//!
//! Structured errors are defined with thiserror. The `kalma` binary wraps
//! them in `anyhow` with command context.

use thiserror::Error;

/// Main error type for Kalma operations
#[derive(Error, Debug)]
pub enum KalmaError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Error surfaced by the libsql driver
    #[error("Database error: {0}")]
    Libsql(#[from] libsql::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Task not found (or owned by someone else)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Invalid task ID format
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] uuid::Error),

    /// Rejected user input (blank title, malformed date, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Kalma operations
pub type Result<T> = std::result::Result<T, KalmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KalmaError::TaskNotFound("test-id".to_string());
        assert_eq!(err.to_string(), "Task not found: test-id");
    }

    #[test]
    fn test_error_conversion() {
        let uuid_err = uuid::Uuid::parse_str("invalid");
        assert!(uuid_err.is_err());

        let kalma_err: KalmaError = uuid_err.unwrap_err().into();
        assert!(matches!(kalma_err, KalmaError::InvalidTaskId(_)));
    }
}
