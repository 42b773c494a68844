use serde::Serialize;
use std::collections::BTreeSet;

/// A table extracted from a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    /// Schema qualifier of the relation, if the statement had one.
    pub schema: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            sql_type: sql_type.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// Space-joined type name parts, e.g. `pg_catalog int4`.
    #[serde(rename = "type")]
    pub sql_type: String,
}

/// Data handed to the template.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub package: String,
    pub tables: Vec<Table>,
}

impl GenerationRequest {
    pub fn new(package: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            package: package.into(),
            tables,
        }
    }
}

/// Raw table names to generate. Empty means every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAllowlist {
    names: BTreeSet<String>,
}

impl TableAllowlist {
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a comma separated list (`users,posts`). Blank entries are ignored.
    pub fn from_csv(s: &str) -> Self {
        s.split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn allows(&self, table: &str) -> bool {
        self.names.is_empty() || self.names.contains(table)
    }
}

impl<S: Into<String>> FromIterator<S> for TableAllowlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allowlist_allows_everything() {
        let allow = TableAllowlist::all();
        assert!(allow.is_empty());
        assert!(allow.allows("users"));
        assert!(allow.allows("anything"));
    }

    #[test]
    fn allowlist_from_csv_trims_and_skips_blanks() {
        let allow = TableAllowlist::from_csv(" users, ,posts,");
        assert!(!allow.is_empty());
        assert!(allow.allows("users"));
        assert!(allow.allows("posts"));
        assert!(!allow.allows("comments"));
        assert!(!allow.allows(""));
    }

    #[test]
    fn allowlist_matching_is_case_sensitive() {
        let allow = TableAllowlist::from_csv("Users");
        assert!(allow.allows("Users"));
        assert!(!allow.allows("users"));
    }

    #[test]
    fn column_type_serializes_as_type() {
        let table = Table::new("users").with_column("id", "int4");
        let value = minijinja::Value::from_serialize(&table);
        let rendered = minijinja::Environment::new()
            .render_str("{{ t.columns[0].type }}", minijinja::context! { t => value })
            .unwrap();
        assert_eq!(rendered, "int4");
    }
}
