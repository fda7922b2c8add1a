//! Error types for running translated statements.
//!
//! Translation itself never fails; everything here comes from SQLite, the
//! filesystem, or plan configuration.

use thiserror::Error;

/// Errors that can occur while executing or deploying statements.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// A plan statement failed; the deployment was rolled back.
    #[error("statement {index} failed: {source} (translated: {translated})")]
    StatementFailed {
        index: usize,
        translated: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The statement translated to nothing, so there is no row to return.
    #[error("statement suppressed by skip marker; no row to return")]
    SuppressedStatement,

    /// Deployment lifecycle failure.
    #[error("deploy error: {0}")]
    DeployError(String),

    /// Bookkeeping table prefix contains invalid characters.
    #[error("invalid prefix '{0}': must contain only alphanumeric characters and underscores")]
    InvalidPrefix(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
