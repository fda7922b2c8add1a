//! The built-in rule lists.
//!
//! Three pipelines, each a process-wide constant compiled on first use:
//!
//! - [`create_table_rules`] for `CREATE TABLE` and `ALTER TABLE`
//! - [`insert_rules`] for `INSERT` / `REPLACE`, run after the general rules
//! - [`general_rules`] for everything else
//!
//! Every pattern is case-insensitive and written with the single-space
//! shorthand described in [`expand_spaces`](crate::expand_spaces). Rule order
//! is significant within each list.

use std::sync::LazyLock;

use crate::rule::{Rule, RuleList};

/// Comment that suppresses a `CREATE TABLE` / `ALTER TABLE` statement
/// entirely when translated.
pub const SKIP_MARKER: &str = "/* sqlite3-skip */";

static CREATE_TABLE_RULES: LazyLock<RuleList> = LazyLock::new(|| {
    RuleList::new(
        "create-table",
        vec![
            // charset names never contain ',' or ')', so a closing column list paren survives
            Rule::fixed(r"(?i) (character set|charset) [^\s,)]+", ""),
            Rule::fixed(r"(?i)int unsigned", "int"),
            Rule::fixed(r"(?i)int[\s]*[(][\s]*([0-9]+)[\s]*[)] unsigned", "int"),
            Rule::fixed(r"(?i)engine[\s]*=[\s]*(innodb|myisam|ndb|memory|tokudb)", ""),
            Rule::fixed(r"(?i)DEFAULT CHARSET[\s]*=[\s]*[\S]+", ""),
            Rule::fixed(r"(?i)int(?: not null)? auto_increment", "integer"),
            Rule::fixed(r"(?i)comment '[^']*'", ""),
            Rule::fixed(r"(?i)after [\S]+", ""),
            Rule::fixed(
                r"(?i)alter table ([\S]+) add (index|key) ([\S]+) (.+)",
                "create index ${3}_${1} on $1 $4",
            ),
            Rule::fixed(
                r"(?i)alter table ([\S]+) add unique (index|key) ([\S]+) (.+)",
                "create unique index ${3}_${1} on $1 $4",
            ),
            Rule::fixed(r"(?i)([\S]+) enum[\s]*([(].*?[)])", "$1 text check($1 in $2)"),
            Rule::fixed(r"(?i)[\s\S]*[/][*] sqlite3-skip [*][/][\s\S]*", ""),
            Rule::fixed(r"(?i)timestamp default current_timestamp", "timestamp default ('')"),
            Rule::fixed(
                r"(?i)timestamp not null default current_timestamp",
                "timestamp not null default ('')",
            ),
            Rule::fixed(r"(?i)add column (.*int) not null[\s]*$", "add column $1 not null default 0"),
            Rule::fixed(r"(?i)add column (.* text) not null[\s]*$", "add column $1 not null default ''"),
            Rule::fixed(
                r"(?i)add column (.* varchar.*) not null[\s]*$",
                "add column $1 not null default ''",
            ),
        ],
    )
});

static INSERT_RULES: LazyLock<RuleList> = LazyLock::new(|| {
    RuleList::new(
        "insert",
        vec![
            Rule::fixed(r"(?i)insert ignore", "insert or ignore"),
            Rule::fixed(r"(?i)now[(][)]", "datetime('now')"),
            Rule::fixed(
                r"(?i)insert into ([\s\S]+) on duplicate key update [\s\S]+",
                "replace into $1",
            ),
        ],
    )
});

static GENERAL_RULES: LazyLock<RuleList> = LazyLock::new(|| {
    RuleList::new(
        "general",
        vec![
            Rule::fixed(
                r"(?i)now[(][)][\s]*[-][\s]*interval [?] ([\w]+)",
                "datetime('now', printf('-%d $1', ?))",
            ),
            Rule::fixed(
                r"(?i)now[(][)][\s]*[+][\s]*interval [?] ([\w]+)",
                "datetime('now', printf('+%d $1', ?))",
            ),
            Rule::fixed(
                r"(?i)now[(][)][\s]*[-][\s]*interval ([0-9.]+) ([\w]+)",
                "datetime('now', '-${1} $2')",
            ),
            Rule::fixed(
                r"(?i)now[(][)][\s]*[+][\s]*interval ([0-9.]+) ([\w]+)",
                "datetime('now', '+${1} $2')",
            ),
            // the leading delimiter is consumed, hence the leading space in the template
            Rule::fixed(
                r"(?i)[=<>\s]([\S]+[.][\S]+)[\s]*[-][\s]*interval [?] ([\w]+)",
                " datetime($1, printf('-%d $2', ?))",
            ),
            Rule::fixed(
                r"(?i)[=<>\s]([\S]+[.][\S]+)[\s]*[+][\s]*interval [?] ([\w]+)",
                " datetime($1, printf('+%d $2', ?))",
            ),
            Rule::fixed(r"(?i)unix_timestamp[(][)]", "strftime('%s', 'now')"),
            Rule::fixed(r"(?i)unix_timestamp[(]([^)]+)[)]", "strftime('%s', $1)"),
            Rule::fixed(r"(?i)now[(][)]", "datetime('now')"),
            Rule::fixed(r"(?i)cast[(][\s]*([\S]+) as signed[\s]*[)]", "cast($1 as integer)"),
            Rule::fixed(
                r"(?i)\bconcat[(][\s]*([^,)]+)[\s]*,[\s]*([^,)]+)[\s]*[)]",
                "($1 || $2)",
            ),
            Rule::fixed(
                r"(?i)\bconcat[(][\s]*([^,)]+)[\s]*,[\s]*([^,)]+)[\s]*,[\s]*([^,)]+)[\s]*[)]",
                "($1 || $2 || $3)",
            ),
            Rule::fixed(r"(?i) rlike ", " like "),
            Rule::fixed(
                r"(?i)create index([\s\S]+)[(][\s]*[0-9]+[\s]*[)]([\s\S]+)",
                "create index ${1}${2}",
            ),
        ],
    )
});

/// Rules for `CREATE TABLE` and `ALTER TABLE` statements.
pub fn create_table_rules() -> &'static RuleList {
    &CREATE_TABLE_RULES
}

/// Rules for `INSERT` and `REPLACE` statements.
pub fn insert_rules() -> &'static RuleList {
    &INSERT_RULES
}

/// Rules applied to every statement that is not table DDL.
pub fn general_rules() -> &'static RuleList {
    &GENERAL_RULES
}
