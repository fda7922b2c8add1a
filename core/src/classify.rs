//! Prefix classification of statements.
//!
//! Each predicate looks only at the leading keywords of a statement,
//! case-insensitively and ignoring leading whitespace. The predicates are
//! independent of [`translate`](crate::translate); callers may use them to
//! branch without translating anything.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rule::compile_static;

struct StatementPatterns {
    create_table: Regex,
    create_index: Regex,
    drop_index: Regex,
    alter_table: Regex,
    insert: Regex,
}

impl StatementPatterns {
    fn new() -> Self {
        Self {
            create_table: compile_static(r"(?i)^[\s]*create table"),
            create_index: compile_static(r"(?i)^[\s]*create(?: unique)? index"),
            drop_index: compile_static(r"(?i)^[\s]*drop index"),
            alter_table: compile_static(r"(?i)^[\s]*alter table"),
            insert: compile_static(r"(?i)^[\s]*(insert|replace)"),
        }
    }
}

static PATTERNS: LazyLock<StatementPatterns> = LazyLock::new(StatementPatterns::new);

/// Returns `true` for statements starting with `INSERT` or `REPLACE`.
pub fn is_insert(statement: &str) -> bool {
    PATTERNS.insert.is_match(statement)
}

/// Returns `true` for statements starting with `CREATE TABLE`.
pub fn is_create_table(statement: &str) -> bool {
    PATTERNS.create_table.is_match(statement)
}

/// Returns `true` for statements starting with `CREATE [UNIQUE] INDEX`.
pub fn is_create_index(statement: &str) -> bool {
    PATTERNS.create_index.is_match(statement)
}

/// Returns `true` for statements starting with `DROP INDEX`.
pub fn is_drop_index(statement: &str) -> bool {
    PATTERNS.drop_index.is_match(statement)
}

/// Returns `true` for statements starting with `ALTER TABLE`.
pub fn is_alter_table(statement: &str) -> bool {
    PATTERNS.alter_table.is_match(statement)
}

/// The category a statement's leading keywords put it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    CreateTable,
    AlterTable,
    CreateIndex,
    DropIndex,
    Insert,
    /// Anything else, including plain `SELECT`, `UPDATE` and `DELETE`.
    Other,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateTable => "create-table",
            Self::AlterTable => "alter-table",
            Self::CreateIndex => "create-index",
            Self::DropIndex => "drop-index",
            Self::Insert => "insert",
            Self::Other => "other",
        }
    }

    /// Whether statements of this kind go through the table DDL rules.
    pub fn is_table_ddl(self) -> bool {
        matches!(self, Self::CreateTable | Self::AlterTable)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies `statement` by its leading keywords.
///
/// ```
/// use sqlite_dialect_core::{StatementKind, classify};
///
/// assert_eq!(classify("  create unique index i on t (a)"), StatementKind::CreateIndex);
/// assert_eq!(classify("select 1"), StatementKind::Other);
/// ```
pub fn classify(statement: &str) -> StatementKind {
    if is_create_table(statement) {
        StatementKind::CreateTable
    } else if is_alter_table(statement) {
        StatementKind::AlterTable
    } else if is_create_index(statement) {
        StatementKind::CreateIndex
    } else if is_drop_index(statement) {
        StatementKind::DropIndex
    } else if is_insert(statement) {
        StatementKind::Insert
    } else {
        StatementKind::Other
    }
}
