//! Deploy plan configuration.
//!
//! A plan is a versioned list of MySQL-flavored statements, usually the
//! schema an application deploys against its primary database. Plans are
//! stored as YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "2024-03-01-base"
//! tolerate_existing: true
//! statements:
//!   - |
//!     CREATE TABLE IF NOT EXISTS node (
//!       id INT UNSIGNED AUTO_INCREMENT,
//!       hostname VARCHAR(128) CHARACTER SET ascii NOT NULL,
//!       PRIMARY KEY (id)
//!     ) ENGINE=InnoDB DEFAULT CHARSET=ascii
//!   - ALTER TABLE node ADD INDEX hostname_idx (hostname)
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A versioned list of statements to deploy.
///
/// # Examples
///
/// ```
/// # use sqlite_dialect_sqlite::DeployPlan;
/// let plan = DeployPlan::new("v1", ["CREATE TABLE t (id INT UNSIGNED)"]);
/// assert_eq!(plan.statements.len(), 1);
/// assert!(!plan.tolerate_existing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPlan {
    /// Identifies the plan; a version is deployed at most once per database.
    pub version: String,
    /// Statements in the primary engine's dialect, executed in order.
    pub statements: Vec<String>,
    /// Count "duplicate column" / "already exists" failures as tolerated
    /// instead of aborting.
    #[serde(default)]
    pub tolerate_existing: bool,
}

impl DeployPlan {
    pub fn new<I, S>(version: impl Into<String>, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: version.into(),
            statements: statements.into_iter().map(Into::into).collect(),
            tolerate_existing: false,
        }
    }

    pub fn tolerating_existing(mut self) -> Self {
        self.tolerate_existing = true;
        self
    }

    /// Parses a plan from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](crate::SqliteError::YamlError) if parsing fails.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads a plan from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::SqliteError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::SqliteError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let plan = serde_yaml::from_reader(reader)?;
        Ok(plan)
    }

    /// Saves the plan as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
