//! Statement translation example.
//!
//! Classifies a handful of MySQL statements and prints what SQLite will
//! receive for each.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p sqlite-dialect-demos --example translate_statements
//! ```

use sqlite_dialect_core::{classify, is_suppressed, translate};

const STATEMENTS: &[&str] = &[
    "CREATE TABLE node (id INT UNSIGNED NOT NULL AUTO_INCREMENT, hostname VARCHAR(128) CHARACTER SET ascii NOT NULL, PRIMARY KEY (id)) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    "ALTER TABLE node ADD UNIQUE KEY hostname_uidx (hostname)",
    "ALTER TABLE node ADD COLUMN port INT NOT NULL",
    "CREATE TABLE node_audit (id INT) ENGINE=ndb /* sqlite3-skip */",
    "INSERT IGNORE INTO node (hostname) VALUES ('db1')",
    "INSERT INTO node (hostname, port) VALUES ('db1', 3306) ON DUPLICATE KEY UPDATE port = VALUES(port)",
    "SELECT hostname FROM node WHERE seen_at > NOW() - INTERVAL ? MINUTE",
    "SELECT CONCAT(hostname, ':', port), UNIX_TIMESTAMP() FROM node",
];

fn main() {
    for statement in STATEMENTS {
        let translated = translate(statement);
        println!("[{}]", classify(statement));
        println!("  mysql:  {statement}");
        if is_suppressed(&translated) {
            println!("  sqlite: (suppressed)");
        } else {
            println!("  sqlite: {}", translated.trim());
        }
        println!();
    }
}
