use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("sqlite_dialect_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sqlite-dialect"))
}

fn run(args: &[&str]) -> Output {
    cli().args(args).output().expect("failed to run sqlite-dialect")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Writes a small deploy plan and returns its path.
fn write_plan(dir: &TempDir, version: &str) -> PathBuf {
    let yaml = format!(
        r#"version: "{version}"
statements:
  - CREATE TABLE kv (k VARCHAR(64) CHARACTER SET ascii NOT NULL, v TEXT, PRIMARY KEY (k)) ENGINE=InnoDB
  - ALTER TABLE kv ADD INDEX v_idx (v)
  - CREATE TABLE kv_shadow (k INT) ENGINE=ndb /* sqlite3-skip */
"#
    );
    let path = dir.join("plan.yaml");
    fs::write(&path, yaml).expect("failed to write plan");
    path
}

// ---------------------------------------------------------------------------
// translate
// ---------------------------------------------------------------------------

#[test]
fn test_translate_alter_add_index() {
    let output = run(&["translate", "ALTER TABLE t ADD INDEX name_idx (name)"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "create index name_idx_t on t (name)");
}

#[test]
fn test_translate_insert_ignore() {
    let output = run(&["translate", "INSERT IGNORE INTO t (id) VALUES (1)"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "insert or ignore INTO t (id) VALUES (1)");
}

#[test]
fn test_translate_skip_marker_prints_nothing() {
    let output = run(&["translate", "CREATE TABLE t (id INT) /* sqlite3-skip */"]);
    assert!(output.status.success());
    assert!(stdout(&output).trim().is_empty());
    assert!(stderr(&output).contains("suppressed"));
}

#[test]
fn test_translate_json_output() {
    let output = run(&["translate", "--format", "json", "SELECT UNIX_TIMESTAMP()"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["kind"], "other");
    assert_eq!(json["input"], "SELECT UNIX_TIMESTAMP()");
    assert_eq!(json["output"], "SELECT strftime('%s', 'now')");
    assert_eq!(json["suppressed"], false);
}

#[test]
fn test_translate_reads_file() {
    let dir = TempDir::new("translate_file");
    let path = dir.join("stmt.sql");
    fs::write(&path, "SELECT CAST(n AS SIGNED) FROM t\n").unwrap();

    let output = run(&["translate", "--file", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "SELECT cast(n as integer) FROM t");
}

#[test]
fn test_translate_reads_stdin() {
    let mut child = cli()
        .arg("translate")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sqlite-dialect");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"INSERT INTO t VALUES (NOW())")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "INSERT INTO t VALUES (datetime('now'))");
}

#[test]
fn test_translate_missing_file_fails() {
    let output = run(&["translate", "--file", "/definitely/not/here.sql"]);
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("error: Failed to read"));
}

// ---------------------------------------------------------------------------
// classify / rules
// ---------------------------------------------------------------------------

#[test]
fn test_classify_statements() {
    let cases = [
        ("CREATE TABLE t (id INT)", "create-table"),
        ("alter table t add column c int", "alter-table"),
        ("CREATE UNIQUE INDEX i ON t (c)", "create-index"),
        ("DROP INDEX i ON t", "drop-index"),
        ("REPLACE INTO t VALUES (1)", "insert"),
        ("SELECT 1", "other"),
    ];
    for (statement, expected) in cases {
        let output = run(&["classify", statement]);
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), expected, "statement: {statement}");
    }
}

#[test]
fn test_rules_lists_every_table() {
    let output = run(&["rules"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("create-table (17 rules)"));
    assert!(text.contains("insert (3 rules)"));
    assert!(text.contains("general (14 rules)"));
}

#[test]
fn test_rules_single_list() {
    let output = run(&["rules", "--list", "insert"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("insert (3 rules)"));
    assert!(text.contains("insert or ignore"));
    assert!(!text.contains("general"));
}

// ---------------------------------------------------------------------------
// deploy / status
// ---------------------------------------------------------------------------

#[test]
fn test_deploy_then_status() {
    let dir = TempDir::new("deploy_status");
    let plan = write_plan(&dir, "v1");
    let db = dir.join("app.db");

    let output = run(&["deploy", "--db", db.to_str().unwrap(), "--plan", plan.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Deploy of 'v1' complete"));
    assert!(text.contains("Statements executed: 2"));
    assert!(text.contains("Statements skipped: 1"));

    let output = run(&["status", "--db", db.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Deployments (1):"));
    assert!(text.contains("v1  3 statement(s)"));
}

#[test]
fn test_deploy_twice_is_noop() {
    let dir = TempDir::new("deploy_twice");
    let plan = write_plan(&dir, "v1");
    let db = dir.join("app.db");
    let args = ["deploy", "--db", db.to_str().unwrap(), "--plan", plan.to_str().unwrap()];

    assert!(run(&args).status.success());
    let output = run(&args);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already deployed"));
}

#[test]
fn test_status_on_fresh_database() {
    let dir = TempDir::new("status_fresh");
    let db = dir.join("empty.db");

    let output = run(&["status", "--db", db.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No deployments recorded"));
}

#[test]
fn test_deploy_rejects_bad_prefix() {
    let dir = TempDir::new("deploy_bad_prefix");
    let plan = write_plan(&dir, "v1");
    let db = dir.join("app.db");

    let output = run(&[
        "deploy",
        "--db",
        db.to_str().unwrap(),
        "--plan",
        plan.to_str().unwrap(),
        "--prefix",
        "bad-prefix;",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn test_deploy_reports_failing_statement() {
    let dir = TempDir::new("deploy_failure");
    let path = dir.join("broken.yaml");
    fs::write(
        &path,
        "version: broken\nstatements:\n  - ALTER TABLE missing ADD INDEX i (c)\n",
    )
    .unwrap();
    let db = dir.join("app.db");

    let output = run(&["deploy", "--db", db.to_str().unwrap(), "--plan", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Deploy of 'broken' failed"));
}

#[test]
fn test_deploy_rejects_reserved_prefix() {
    let dir = TempDir::new("deploy_reserved_prefix");
    let plan = write_plan(&dir, "v1");
    let db = dir.join("app.db");

    let output = run(&[
        "deploy",
        "--db",
        db.to_str().unwrap(),
        "--plan",
        plan.to_str().unwrap(),
        "--prefix",
        "sqlite_app_",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid prefix 'sqlite_app_'"));
}
