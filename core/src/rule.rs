//! Rewrite rules and the engine that folds a statement through them.
//!
//! A [`Rule`] pairs a compiled pattern with a replacement template. Patterns
//! are authored with single spaces standing in for "one or more whitespace
//! characters"; [`expand_spaces`] performs that expansion before compilation
//! so every rule and classifier shares the same shorthand.
//!
//! # Examples
//!
//! ```
//! use sqlite_dialect_core::{Rule, RuleList};
//!
//! let rules = RuleList::new(
//!     "demo",
//!     vec![
//!         Rule::new(r"(?i)insert ignore", "insert or ignore").unwrap(),
//!         Rule::new(r"(?i)now[(][)]", "datetime('now')").unwrap(),
//!     ],
//! );
//!
//! assert_eq!(
//!     rules.apply("INSERT   IGNORE INTO t VALUES (NOW())"),
//!     "insert or ignore INTO t VALUES (datetime('now'))"
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

/// Errors raised while building a [`Rule`] from an authored pattern.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern did not compile after whitespace expansion.
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Expands each literal space in `pattern` into `[\s]+`.
///
/// ```
/// assert_eq!(sqlite_dialect_core::expand_spaces("insert ignore"), r"insert[\s]+ignore");
/// ```
pub fn expand_spaces(pattern: &str) -> String {
    pattern.replace(' ', r"[\s]+")
}

/// Compiles a built-in pattern, panicking if it is malformed.
pub(crate) fn compile_static(pattern: &str) -> Regex {
    Regex::new(&expand_spaces(pattern)).expect("static regex must compile")
}

/// A single match-and-replace step.
///
/// Rules are immutable once built. [`Rule::apply`] replaces every
/// non-overlapping match, not just the first. Replacement templates use the
/// `regex` crate syntax: `$1`, `${1}` or `$name`.
#[derive(Clone)]
pub struct Rule {
    authored: String,
    regex: Regex,
    replacement: String,
}

impl Rule {
    /// Builds a rule from an authored pattern and a replacement template.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the expanded pattern does
    /// not compile.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Result<Self, RuleError> {
        let authored = pattern.into();
        let regex = Regex::new(&expand_spaces(&authored)).map_err(|source| RuleError::InvalidPattern {
            pattern: authored.clone(),
            source,
        })?;
        Ok(Self {
            authored,
            regex,
            replacement: replacement.into(),
        })
    }

    /// Builds one of the crate's own rules.
    pub(crate) fn fixed(pattern: &str, replacement: &str) -> Self {
        Self {
            authored: pattern.to_string(),
            regex: compile_static(pattern),
            replacement: replacement.to_string(),
        }
    }

    /// The pattern as authored, before whitespace expansion.
    pub fn pattern(&self) -> &str {
        &self.authored
    }

    /// The pattern actually compiled.
    pub fn expanded_pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns `true` if the rule would change anything in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replaces every match of the rule in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, self.replacement.as_str())
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.authored)
            .field("replacement", &self.replacement)
            .finish()
    }
}

/// An ordered pipeline of rules.
///
/// Order matters: each rule sees the output of the rule before it, so a later
/// rule may rely on (or must not undo) an earlier rewrite.
#[derive(Debug, Clone)]
pub struct RuleList {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleList {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Runs `statement` through every rule once, in order.
    pub fn apply(&self, statement: &str) -> String {
        let mut current = statement.to_string();
        for (index, rule) in self.rules.iter().enumerate() {
            if let Cow::Owned(rewritten) = rule.apply(&current) {
                trace!(list = self.name, rule = index, pattern = rule.pattern(), "rule applied");
                current = rewritten;
            }
        }
        current
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Applies `rules` to `statement`; see [`RuleList::apply`].
pub fn apply_rules(statement: &str, rules: &RuleList) -> String {
    rules.apply(statement)
}
