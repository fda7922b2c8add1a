//! Statement dispatch.
//!
//! [`translate`] picks the rule lists for a statement from its leading
//! keywords. The decision order is fixed:
//!
//! 1. `CREATE TABLE` → create-table rules, done.
//! 2. `ALTER TABLE` → the same create-table rules, done.
//! 3. Otherwise the general rules, then the insert rules if the result
//!    starts with `INSERT` or `REPLACE`.
//!
//! `CREATE INDEX` and `DROP INDEX` have no list of their own and take the
//! general path.

use tracing::debug;

use crate::classify::{is_alter_table, is_create_table, is_insert};
use crate::rules::{create_table_rules, general_rules, insert_rules};

/// Translates a MySQL-flavored statement into SQLite syntax.
///
/// Never fails. Statements outside the shapes the rules anticipate come
/// back unchanged or partially rewritten. A table DDL statement carrying
/// the [`SKIP_MARKER`](crate::SKIP_MARKER) comes back empty, meaning
/// "do not execute".
///
/// ```
/// use sqlite_dialect_core::translate;
///
/// assert_eq!(
///     translate("INSERT IGNORE INTO t (a) VALUES (1)"),
///     "insert or ignore INTO t (a) VALUES (1)"
/// );
/// assert_eq!(
///     translate("ALTER TABLE t ADD INDEX idx_name (name)"),
///     "create index idx_name_t on t (name)"
/// );
/// ```
pub fn translate(statement: &str) -> String {
    if is_create_table(statement) || is_alter_table(statement) {
        let translated = to_sqlite3_create_table(statement);
        if is_suppressed(&translated) {
            debug!("table statement suppressed by skip marker");
        }
        return translated;
    }

    let statement = general_rules().apply(statement);
    if is_insert(&statement) {
        return to_sqlite3_insert(&statement);
    }
    statement
}

/// Applies only the create-table rules, whatever the statement is.
pub fn to_sqlite3_create_table(statement: &str) -> String {
    create_table_rules().apply(statement)
}

/// Applies only the insert rules, whatever the statement is.
pub fn to_sqlite3_insert(statement: &str) -> String {
    insert_rules().apply(statement)
}

/// Returns `true` if a translated statement should not be executed.
pub fn is_suppressed(translated: &str) -> bool {
    translated.trim().is_empty()
}
