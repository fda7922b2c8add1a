//! A SQLite connection that accepts MySQL-flavored statements.
//!
//! Every statement passed to [`DialectConnection`] is run through
//! [`translate`] first. Statements that translate to nothing (table DDL
//! carrying the skip marker) are not sent to SQLite at all.
//!
//! # Example
//!
//! ```
//! use sqlite_dialect_sqlite::{DialectConnection, Execution};
//!
//! let conn = DialectConnection::open_in_memory().unwrap();
//! conn.execute("CREATE TABLE t (id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, n INT)", []).unwrap();
//! let outcome = conn.execute("INSERT IGNORE INTO t (n) VALUES (?)", [7]).unwrap();
//! assert_eq!(outcome, Execution::Executed { rows_affected: 1 });
//!
//! let n: i64 = conn.query_row("SELECT CAST(n AS SIGNED) FROM t", [], |row| row.get(0)).unwrap();
//! assert_eq!(n, 7);
//! ```

use std::collections::HashMap;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, Params, Row};
use serde_json::Value;
use sqlite_dialect_core::{is_suppressed, translate};
use tracing::debug;

use crate::error::{Result, SqliteError};

/// One result row, keyed by column name.
pub type RowMap = HashMap<String, Value>;

/// Outcome of [`DialectConnection::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// The translated statement ran.
    Executed { rows_affected: usize },
    /// The statement translated to nothing and was not sent.
    Skipped,
}

impl Execution {
    pub fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Translates `statement` and executes it on `conn` unless it is suppressed.
///
/// Works on plain connections and on transactions alike.
pub(crate) fn execute_translated<P: Params>(
    conn: &Connection,
    statement: &str,
    params: P,
) -> rusqlite::Result<Execution> {
    let translated = translate(statement);
    if is_suppressed(&translated) {
        debug!(statement = statement.trim(), "statement suppressed, not executed");
        return Ok(Execution::Skipped);
    }
    debug!(translated = translated.trim(), "executing translated statement");
    let rows_affected = conn.execute(&translated, params)?;
    Ok(Execution::Executed { rows_affected })
}

/// Translates a query, or returns `None` when it must not be executed.
fn translate_query(statement: &str) -> Option<String> {
    let translated = translate(statement);
    if is_suppressed(&translated) {
        debug!(statement = statement.trim(), "query suppressed, not executed");
        return None;
    }
    Some(translated)
}

/// Wraps a [`rusqlite::Connection`], translating every statement before it
/// reaches SQLite.
pub struct DialectConnection {
    conn: Connection,
}

impl DialectConnection {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Translates and executes a statement that returns no rows.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`](crate::SqliteError::DatabaseError) if SQLite
    /// rejects the translated statement.
    pub fn execute<P: Params>(&self, statement: &str, params: P) -> Result<Execution> {
        Ok(execute_translated(&self.conn, statement, params)?)
    }

    /// Translates a query and maps its first row with `f`.
    ///
    /// # Errors
    ///
    /// Returns [`SuppressedStatement`](crate::SqliteError::SuppressedStatement)
    /// if the statement translates to nothing.
    pub fn query_row<T, P, F>(&self, statement: &str, params: P, f: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let translated = translate_query(statement).ok_or(SqliteError::SuppressedStatement)?;
        Ok(self.conn.query_row(&translated, params, f)?)
    }

    /// Translates a query and returns every row as a column-name map.
    ///
    /// Integers and reals become JSON numbers, text becomes strings and
    /// blobs become arrays of bytes. A statement that translates to nothing
    /// yields no rows.
    pub fn query_rows_map<P: Params>(&self, statement: &str, params: P) -> Result<Vec<RowMap>> {
        let Some(translated) = translate_query(statement) else {
            return Ok(Vec::new());
        };
        let mut stmt = self.conn.prepare(&translated)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params)?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = RowMap::with_capacity(columns.len());
            for (idx, name) in columns.iter().enumerate() {
                map.insert(name.clone(), cell_value(row.get_ref(idx)?));
            }
            result.push(map);
        }
        Ok(result)
    }

    /// Returns a reference to the underlying connection, for SQLite-native
    /// statements that should not be translated.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Consumes the wrapper and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl From<Connection> for DialectConnection {
    fn from(conn: Connection) -> Self {
        Self::new(conn)
    }
}

fn cell_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
