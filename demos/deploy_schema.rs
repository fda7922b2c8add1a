//! Schema deployment and query workflow example.
//!
//! Deploys a MySQL schema plan to an in-memory SQLite database, writes a few
//! rows with MySQL-only syntax and reads them back as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p sqlite-dialect-demos --example deploy_schema
//! ```

use sqlite_dialect_sqlite::{DeployPlan, Deployment, DialectConnection};

fn main() {
    // === Step 1: Deploy the schema ===
    println!("=== Deploy ===");
    let plan = DeployPlan::new(
        "2024-01-base",
        [
            "CREATE TABLE node (
                id INT UNSIGNED NOT NULL AUTO_INCREMENT,
                hostname VARCHAR(128) CHARACTER SET ascii NOT NULL,
                role ENUM('primary', 'replica') NOT NULL,
                seen_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (id)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
            "ALTER TABLE node ADD UNIQUE KEY hostname_uidx (hostname)",
            "ALTER TABLE node ADD COLUMN port INT NOT NULL",
            "CREATE TABLE node_audit (id INT) ENGINE=ndb /* sqlite3-skip */",
        ],
    );

    let conn = DialectConnection::open_in_memory().unwrap();
    let mut deployment = Deployment::new(conn, "demo_").unwrap();
    let report = deployment.deploy(&plan).unwrap();
    println!(
        "Deployed '{}': {} executed, {} skipped",
        report.version, report.executed, report.skipped
    );

    // === Step 2: Write rows with MySQL syntax ===
    println!("\n=== Write ===");
    let conn = deployment.connection();
    conn.execute(
        "INSERT INTO node (hostname, role, port, seen_at) VALUES ('db1', 'primary', 3306, NOW())",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO node (hostname, role, port, seen_at) VALUES ('db2', 'replica', 3306, NOW() - INTERVAL 3 DAY)",
        [],
    )
    .unwrap();
    let ignored = conn
        .execute("INSERT IGNORE INTO node (hostname, role) VALUES ('db1', 'replica')", [])
        .unwrap();
    println!("Duplicate insert: {ignored:?}");

    // === Step 3: Query ===
    println!("\n=== Query ===");
    let rows = conn
        .query_rows_map(
            "SELECT CONCAT(hostname, ':', port) AS endpoint, role FROM node WHERE seen_at > NOW() - INTERVAL ? DAY",
            [1],
        )
        .unwrap();
    println!("{}", serde_json::to_string_pretty(&rows).unwrap());

    // === Step 4: Status ===
    println!("\n=== Status ===");
    for deployed in deployment.status().unwrap().deployments {
        println!(
            "  {} ({} statements) at {}",
            deployed.version, deployed.statement_count, deployed.deployed_at
        );
    }
}
