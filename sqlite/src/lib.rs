//! Run MySQL-flavored statements against SQLite.
//!
//! This crate is the execution side of the translator in
//! [`sqlite_dialect_core`]: application code written against MySQL hands
//! its statements to a [`DialectConnection`], which translates each one and
//! executes the result on a [`rusqlite::Connection`]. Statements suppressed
//! with the `/* sqlite3-skip */` marker are never sent.
//!
//! # Architecture
//!
//! - **`connection`**: [`DialectConnection`]: translate-then-execute,
//!   single-row queries and row maps
//! - **`config`**: [`DeployPlan`]: versioned statement lists stored as YAML
//! - **`deploy`**: [`Deployment`]: applies plans transactionally and records
//!   deployed versions
//!
//! # Quick start
//!
//! ```no_run
//! use sqlite_dialect_sqlite::{DeployPlan, Deployment, DialectConnection};
//!
//! let conn = DialectConnection::open("app.db").unwrap();
//! let mut deployment = Deployment::new(conn, "app_").unwrap();
//!
//! let plan = DeployPlan::load("schema/plan.yaml").unwrap();
//! let report = deployment.deploy(&plan).unwrap();
//! println!("executed {}, skipped {}", report.executed, report.skipped);
//!
//! let rows = deployment
//!     .connection()
//!     .query_rows_map("SELECT * FROM node WHERE seen > NOW() - INTERVAL ? MINUTE", [5])
//!     .unwrap();
//! println!("{} fresh nodes", rows.len());
//! ```

mod config;
mod connection;
mod deploy;
mod error;

pub use config::DeployPlan;
pub use connection::{DialectConnection, Execution, RowMap};
pub use deploy::{DeployReport, DeployStatus, DeployedVersion, Deployment};
pub use error::{Result, SqliteError};
