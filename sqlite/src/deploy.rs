//! Deploying MySQL-flavored schema plans onto SQLite.
//!
//! [`Deployment`] executes every statement of a [`DeployPlan`] through the
//! translator inside one transaction and records the plan version in a
//! bookkeeping table, `{prefix}deployments`, so that a version is applied
//! at most once.
//!
//! # Example
//!
//! ```
//! use sqlite_dialect_sqlite::{DeployPlan, Deployment, DialectConnection};
//!
//! let conn = DialectConnection::open_in_memory().unwrap();
//! let mut deployment = Deployment::new(conn, "app_").unwrap();
//!
//! let plan = DeployPlan::new(
//!     "v1",
//!     [
//!         "CREATE TABLE node (id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, host VARCHAR(64)) ENGINE=InnoDB",
//!         "ALTER TABLE node ADD INDEX host_idx (host)",
//!     ],
//! );
//! let report = deployment.deploy(&plan).unwrap();
//! assert_eq!(report.executed, 2);
//!
//! // A second run is a no-op.
//! assert!(deployment.deploy(&plan).unwrap().already_deployed);
//! ```

use rusqlite::params;
use sqlite_dialect_core::translate;
use tracing::{debug, info, warn};

use crate::config::DeployPlan;
use crate::connection::{DialectConnection, Execution, execute_translated};
use crate::error::{Result, SqliteError};

/// Validates that a table prefix contains only alphanumeric characters and underscores.
///
/// SQLite reserves every table name starting with `sqlite_`, so such prefixes
/// are rejected too.
pub(crate) fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    if !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    if prefix.to_ascii_lowercase().starts_with(RESERVED_PREFIX) {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

const RESERVED_PREFIX: &str = "sqlite_";

/// Bookkeeping DDL, written for MySQL and translated like any other statement.
fn bookkeeping_table_sql(prefix: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {prefix}deployments (
    version VARCHAR(128) CHARACTER SET ascii NOT NULL,
    statement_count INT UNSIGNED NOT NULL,
    deployed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (version)
) ENGINE=InnoDB DEFAULT CHARSET=ascii
"#
    )
}

/// SQLite reports these when a plan re-creates something that is already there.
fn is_existing_object_error(err: &rusqlite::Error) -> bool {
    let message = err.to_string();
    message.contains("duplicate column name") || message.contains("already exists")
}

/// Applies [`DeployPlan`]s to a database and tracks which versions ran.
pub struct Deployment {
    conn: DialectConnection,
    prefix: String,
}

impl Deployment {
    /// Creates a deployment manager for the given connection and
    /// bookkeeping-table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidPrefix`] if the prefix contains invalid characters.
    pub fn new(conn: DialectConnection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self { conn, prefix })
    }

    /// Deploys `plan` unless its version has already been recorded.
    ///
    /// All statements run in a single transaction. Statements suppressed by
    /// the skip marker are counted in [`DeployReport::skipped`]. When the
    /// plan tolerates existing objects, "duplicate column" and "already
    /// exists" failures are counted in [`DeployReport::tolerated`].
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::StatementFailed`] for the first statement SQLite
    /// rejects; nothing from the plan is kept in that case.
    pub fn deploy(&mut self, plan: &DeployPlan) -> Result<DeployReport> {
        if plan.version.trim().is_empty() {
            return Err(SqliteError::DeployError("plan version cannot be empty".to_string()));
        }
        self.ensure_bookkeeping_table()?;

        let mut report = DeployReport {
            version: plan.version.clone(),
            ..DeployReport::default()
        };
        if self.is_deployed(&plan.version)? {
            info!(version = %plan.version, "plan already deployed");
            report.already_deployed = true;
            return Ok(report);
        }

        let record_sql = format!(
            "INSERT INTO {}deployments (version, statement_count, deployed_at) VALUES (?, ?, NOW())",
            self.prefix
        );
        let tx = self.conn.connection_mut().transaction()?;

        for (index, statement) in plan.statements.iter().enumerate() {
            match execute_translated(&tx, statement, []) {
                Ok(Execution::Executed { .. }) => report.executed += 1,
                Ok(Execution::Skipped) => report.skipped += 1,
                Err(err) if plan.tolerate_existing && is_existing_object_error(&err) => {
                    warn!(index, error = %err, "tolerating existing object");
                    report.tolerated += 1;
                }
                Err(source) => {
                    return Err(SqliteError::StatementFailed {
                        index,
                        translated: translate(statement).trim().to_string(),
                        source,
                    });
                }
            }
        }

        tx.execute(
            &translate(&record_sql),
            params![plan.version, plan.statements.len() as i64],
        )?;
        tx.commit()?;

        info!(
            version = %plan.version,
            executed = report.executed,
            skipped = report.skipped,
            tolerated = report.tolerated,
            "plan deployed"
        );
        Ok(report)
    }

    /// Returns `true` if `version` has been recorded as deployed.
    pub fn is_deployed(&self, version: &str) -> Result<bool> {
        if !self.table_exists()? {
            return Ok(false);
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}deployments WHERE version = ?", self.prefix),
            [version],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Returns the recorded deployments in the order they were applied.
    pub fn status(&self) -> Result<DeployStatus> {
        if !self.table_exists()? {
            return Ok(DeployStatus {
                table_exists: false,
                deployments: Vec::new(),
            });
        }

        let mut stmt = self.conn.connection().prepare(&format!(
            "SELECT version, statement_count, deployed_at FROM {}deployments ORDER BY rowid",
            self.prefix
        ))?;
        let deployments = stmt
            .query_map([], |row| {
                Ok(DeployedVersion {
                    version: row.get(0)?,
                    statement_count: row.get(1)?,
                    deployed_at: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(DeployStatus {
            table_exists: true,
            deployments,
        })
    }

    /// Returns a reference to the wrapped connection.
    pub fn connection(&self) -> &DialectConnection {
        &self.conn
    }

    /// Consumes the deployment and returns the wrapped connection.
    pub fn into_connection(self) -> DialectConnection {
        self.conn
    }

    fn ensure_bookkeeping_table(&self) -> Result<()> {
        debug!(prefix = %self.prefix, "ensuring bookkeeping table");
        self.conn
            .execute(&bookkeeping_table_sql(&self.prefix), [])
            .map_err(|e| SqliteError::DeployError(format!("failed to create bookkeeping table: {e}")))?;
        Ok(())
    }

    fn table_exists(&self) -> Result<bool> {
        let table_name = format!("{}deployments", self.prefix);
        let mut stmt = self
            .conn
            .connection()
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
        let count: i64 = stmt.query_row([&table_name], |row| row.get(0))?;
        Ok(count > 0)
    }
}

/// Result of [`Deployment::deploy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Version of the plan.
    pub version: String,
    /// The version was already recorded; nothing ran.
    pub already_deployed: bool,
    /// Statements executed.
    pub executed: usize,
    /// Statements suppressed by the skip marker.
    pub skipped: usize,
    /// Statements whose "already exists" failure was tolerated.
    pub tolerated: usize,
}

/// A recorded deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedVersion {
    pub version: String,
    pub statement_count: i64,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub deployed_at: String,
}

/// Snapshot returned by [`Deployment::status`].
#[derive(Debug, Clone)]
pub struct DeployStatus {
    /// Whether the bookkeeping table exists.
    pub table_exists: bool,
    /// Deployed versions, oldest first.
    pub deployments: Vec<DeployedVersion>,
}
