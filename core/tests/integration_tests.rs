//! Dispatch and classification properties of the translator.

use proptest::prelude::*;
use sqlite_dialect_core::{
    StatementKind, classify, create_table_rules, general_rules, insert_rules, is_alter_table,
    is_create_index, is_create_table, is_drop_index, is_insert, to_sqlite3_create_table, translate,
};

fn leading_whitespace() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,6}"
}

/// Mixed-case spelling of a keyword sequence with arbitrary whitespace runs.
fn keywords(words: &'static [&'static str]) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any::<bool>(), 16),
        prop::collection::vec("[ \t\n]{1,3}", words.len()),
    )
        .prop_map(move |(upper, gaps)| {
            let mut out = String::new();
            let mut flag = upper.iter().cycle();
            for (word, gap) in words.iter().zip(gaps) {
                for ch in word.chars() {
                    if *flag.next().unwrap_or(&false) {
                        out.extend(ch.to_uppercase());
                    } else {
                        out.push(ch);
                    }
                }
                out.push_str(&gap);
            }
            out
        })
}

fn column_body() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "t (id int unsigned auto_increment, name varchar(10) character set utf8)".to_string(),
        "t (id int(11) unsigned not null, ts timestamp not null default current_timestamp) engine=innodb".to_string(),
        "t (state enum('a', 'b'), note text comment 'free text')".to_string(),
        "t (id int) /* sqlite3-skip */".to_string(),
        "t (a int, b varchar(8) default 'now()')".to_string(),
    ])
}

proptest! {
    #[test]
    fn test_create_table_is_one_pass_of_create_table_rules(
        lead in leading_whitespace(),
        head in keywords(&["create", "table"]),
        body in column_body(),
    ) {
        let statement = format!("{lead}{head}{body}");
        prop_assert!(is_create_table(&statement));
        prop_assert_eq!(classify(&statement), StatementKind::CreateTable);
        prop_assert_eq!(translate(&statement), create_table_rules().apply(&statement));
    }

    #[test]
    fn test_alter_table_uses_create_table_rules(
        lead in leading_whitespace(),
        head in keywords(&["alter", "table"]),
        index in "[a-z]{1,8}_idx",
        column in "[a-z]{1,8}",
    ) {
        let statement = format!("{lead}{head}t add index {index} ({column})");
        prop_assert!(is_alter_table(&statement));
        let translated = translate(&statement);
        prop_assert_eq!(&translated, &to_sqlite3_create_table(&statement));
        prop_assert_eq!(
            translated.trim().to_string(),
            format!("create index {index}_t on t ({column})")
        );
    }

    #[test]
    fn test_at_most_one_predicate_holds(
        lead in leading_whitespace(),
        head in prop::sample::select(vec![
            "create table",
            "alter table",
            "create index",
            "create unique index",
            "drop index",
            "insert into",
            "replace into",
            "select",
            "update",
        ]),
        tail in "[a-z_]{1,10}",
    ) {
        let statement = format!("{lead}{head} {tail}");
        let hits = [
            is_insert(&statement),
            is_create_table(&statement),
            is_create_index(&statement),
            is_drop_index(&statement),
            is_alter_table(&statement),
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count();
        prop_assert!(hits <= 1);
    }

    #[test]
    fn test_non_ddl_is_general_then_insert(
        statement in prop::sample::select(vec![
            "select now() - interval ? minute",
            "insert ignore into t (a) values (now())",
            "insert into t (a) values (concat(?, 'x')) on duplicate key update a = values(a)",
            "replace into t (a) values (unix_timestamp())",
            "delete from t where ts < now() - interval 7 day",
            "create index i on t (c(10))",
        ]),
    ) {
        let general = general_rules().apply(statement);
        let expected = if is_insert(&general) {
            insert_rules().apply(&general)
        } else {
            general
        };
        prop_assert_eq!(translate(statement), expected);
    }
}

#[test]
fn test_translates_realistic_schema_statements() {
    let cases = [
        (
            "CREATE TABLE t (id INT UNSIGNED AUTO_INCREMENT, name VARCHAR(10) CHARACTER SET utf8)",
            "CREATE TABLE t (id integer, name VARCHAR(10))",
        ),
        (
            "ALTER TABLE t ADD INDEX idx_name (name)",
            "create index idx_name_t on t (name)",
        ),
        (
            "alter table node_health add unique key hostname_token (hostname, token)",
            "create unique index hostname_token_node_health on node_health (hostname, token)",
        ),
        (
            "INSERT IGNORE INTO t (a) VALUES (1)",
            "insert or ignore INTO t (a) VALUES (1)",
        ),
        (
            "SELECT * FROM t WHERE ts > NOW() - INTERVAL ? DAY",
            "SELECT * FROM t WHERE ts > datetime('now', printf('-%d DAY', ?))",
        ),
        (
            "select name from t where name rlike '^a' and cast(n as signed) > 0",
            "select name from t where name like '^a' and cast(n as integer) > 0",
        ),
        ("CREATE TABLE t (id INT) /* sqlite3-skip */", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(translate(input), expected, "translating {input}");
    }
}
