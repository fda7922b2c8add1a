//! MySQL-to-SQLite statement translation.
//!
//! This crate rewrites statements written for MySQL so that SQLite accepts
//! them. It is not a parser: statements are classified by their leading
//! keywords and then pushed through ordered lists of regex substitutions.
//! Only the statement shapes the rules anticipate are handled; anything else
//! passes through unchanged or partially rewritten.
//!
//! - [`translate`]: the entry point; classifies and dispatches.
//! - [`is_insert`], [`is_create_table`], [`is_create_index`],
//!   [`is_drop_index`], [`is_alter_table`]: prefix predicates, usable on
//!   their own.
//! - [`create_table_rules`], [`insert_rules`], [`general_rules`]: the
//!   built-in [`RuleList`]s.
//! - [`Rule`] and [`RuleList`]: for building and applying extra pipelines.
//!
//! # Example
//!
//! ```
//! use sqlite_dialect_core::*;
//!
//! let ddl = "CREATE TABLE t (id INT UNSIGNED AUTO_INCREMENT, v VARCHAR(10)) ENGINE=InnoDB";
//! assert!(is_create_table(ddl));
//! assert_eq!(translate(ddl), "CREATE TABLE t (id integer, v VARCHAR(10)) ");
//!
//! // Table DDL carrying the skip marker is suppressed.
//! let skipped = translate("CREATE TABLE audit (id INT) /* sqlite3-skip */");
//! assert!(is_suppressed(&skipped));
//! ```

mod classify;
mod rule;
mod rules;
mod translate;

pub use classify::{
    StatementKind, classify, is_alter_table, is_create_index, is_create_table, is_drop_index,
    is_insert,
};
pub use rule::{Rule, RuleError, RuleList, apply_rules, expand_spaces};
pub use rules::{SKIP_MARKER, create_table_rules, general_rules, insert_rules};
pub use translate::{is_suppressed, to_sqlite3_create_table, to_sqlite3_insert, translate};
