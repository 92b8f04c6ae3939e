//! Ignore rules: which tables, or which columns of a table, are left out.

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use serde::Deserialize;

use crate::{Error, Result};

/// Raw shape of the YAML ignore file.
///
/// ```yaml
/// ignores:
///   - table: secrets          # whole table
///   - table: orders
///     columns: [note, memo]   # only these columns
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub ignores: Option<Vec<IgnoreEntry>>,
}

/// One entry of the `ignores` list.
#[derive(Debug, Deserialize)]
pub struct IgnoreEntry {
    pub table: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

/// Exclusions configured for a single table.
///
/// An empty column set excludes the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRule {
    pub table: String,
    pub columns: BTreeSet<String>,
}

impl IgnoreRule {
    /// A rule that excludes the whole table.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: BTreeSet::new(),
        }
    }

    /// A rule that excludes the given columns of a table.
    pub fn columns<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this rule drops the table entirely.
    pub fn excludes_table(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether this rule drops the given column.
    pub fn excludes_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}

impl From<IgnoreEntry> for IgnoreRule {
    fn from(entry: IgnoreEntry) -> Self {
        IgnoreRule::columns(entry.table, entry.columns.unwrap_or_default())
    }
}

/// All configured rules, keyed by exact table name.
///
/// Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: HashMap<String, IgnoreRule>,
}

impl IgnoreRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from an optional file. No path means no rules.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::new()),
        }
    }

    /// Read and parse an ignore file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        Self::from_str_with_filename(&content, &filename)
    }

    /// Parse an ignore file's content, using `filename` in diagnostics.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let config: IgnoreConfig =
            serde_yaml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

        Ok(config
            .ignores
            .unwrap_or_default()
            .into_iter()
            .map(IgnoreRule::from)
            .collect())
    }

    /// Add a rule, replacing any earlier rule for the same table.
    pub fn insert(&mut self, rule: IgnoreRule) {
        self.rules.insert(rule.table.clone(), rule);
    }

    /// Get the rule for a table, if any.
    pub fn rule_for(&self, table: &str) -> Option<&IgnoreRule> {
        self.rules.get(table)
    }

    /// Whether a table is excluded as a whole.
    pub fn is_table_ignored(&self, table: &str) -> bool {
        self.rule_for(table).is_some_and(IgnoreRule::excludes_table)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<IgnoreRule> for IgnoreRules {
    fn from_iter<T: IntoIterator<Item = IgnoreRule>>(iter: T) -> Self {
        let mut rules = Self::new();
        for rule in iter {
            rules.insert(rule);
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn parse(content: &str) -> IgnoreRules {
        IgnoreRules::from_str_with_filename(content, "ignore.yaml").unwrap()
    }

    fn column_ignored(rules: &IgnoreRules, table: &str, column: &str) -> bool {
        rules
            .rule_for(table)
            .is_some_and(|rule| rule.excludes_column(column))
    }

    #[test]
    fn test_parse_table_and_column_rules() {
        let rules = parse(
            r#"
ignores:
  - table: secrets
  - table: orders
    columns: [note, memo]
"#,
        );

        assert_eq!(rules.len(), 2);
        assert!(rules.is_table_ignored("secrets"));
        assert!(!rules.is_table_ignored("orders"));
        assert!(column_ignored(&rules, "orders", "note"));
        assert!(column_ignored(&rules, "orders", "memo"));
        assert!(!column_ignored(&rules, "orders", "id"));
    }

    #[test]
    fn test_empty_column_list_ignores_table() {
        let rules = parse("ignores:\n  - table: audit\n    columns: []\n");
        assert!(rules.is_table_ignored("audit"));
    }

    #[test]
    fn test_no_rule_means_no_exclusion() {
        let rules = parse("ignores:\n  - table: secrets\n");
        assert!(!rules.is_table_ignored("users"));
        assert!(!column_ignored(&rules, "users", "password"));
        assert!(rules.rule_for("users").is_none());
    }

    #[test]
    fn test_table_match_is_exact() {
        let rules = parse("ignores:\n  - table: secrets\n");
        assert!(!rules.is_table_ignored("Secrets"));
        assert!(!rules.is_table_ignored("secrets_archive"));
    }

    #[test]
    fn test_column_rule_does_not_ignore_its_columns_elsewhere() {
        let rules = parse("ignores:\n  - table: orders\n    columns: [note]\n");
        assert!(!column_ignored(&rules, "invoices", "note"));
    }

    #[test]
    fn test_later_entry_replaces_earlier() {
        let rules = parse(
            r#"
ignores:
  - table: orders
  - table: orders
    columns: [note]
"#,
        );
        assert!(!rules.is_table_ignored("orders"));
        assert!(column_ignored(&rules, "orders", "note"));
    }

    #[test]
    fn test_empty_documents() {
        assert!(parse("").is_empty());
        assert!(parse("   \n").is_empty());
        assert!(parse("ignores:\n").is_empty());
    }

    #[test]
    fn test_parse_error_has_source_context() {
        let err = IgnoreRules::from_str_with_filename("ignores: [table: x", "bad.yaml")
            .unwrap_err();
        match err.as_ref() {
            Error::Parse { src, .. } => assert_eq!(src.name(), "bad.yaml"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let err = IgnoreRules::from_str_with_filename("ignores: secrets\n", "bad.yaml")
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_load_without_path() {
        assert!(IgnoreRules::load(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ignore.yaml");
        fs::write(&path, "ignores:\n  - table: secrets\n").unwrap();

        let rules = IgnoreRules::load(Some(path.as_path())).unwrap();
        assert!(rules.is_table_ignored("secrets"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yaml");

        let err = IgnoreRules::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
