use pg_query::NodeEnum;
use std::fmt::{self, Write as _};

/// Non-fatal findings of schema extraction.
///
/// Each one is logged when it is recorded and returned to the caller, so the
/// run outcome never depends on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A top-level statement that is not `CREATE TABLE`.
    UnsupportedStatement { index: usize, kind: String },
    /// A `RawStmt` wrapper with no statement inside.
    EmptyStatement { index: usize },
    /// A `CREATE TABLE` without a relation name.
    UnnamedTable { index: usize },
    /// A type name part that is not a plain string.
    UnsupportedNode {
        table: String,
        column: String,
        kind: String,
    },
}

impl Diagnostic {
    pub(crate) fn unsupported_statement(index: usize, node: &NodeEnum) -> Self {
        let diag = Diagnostic::UnsupportedStatement {
            index,
            kind: node_kind(node),
        };
        tracing::info!("{diag}");
        diag
    }

    pub(crate) fn empty_statement(index: usize) -> Self {
        let diag = Diagnostic::EmptyStatement { index };
        tracing::info!("{diag}");
        diag
    }

    pub(crate) fn unnamed_table(index: usize) -> Self {
        let diag = Diagnostic::UnnamedTable { index };
        tracing::warn!("{diag}");
        diag
    }

    pub(crate) fn unsupported_node(table: &str, column: &str, node: &NodeEnum) -> Self {
        let diag = Diagnostic::UnsupportedNode {
            table: table.to_string(),
            column: column.to_string(),
            kind: node_kind(node),
        };
        tracing::warn!("{diag}");
        diag
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedStatement { index, kind } => {
                write!(f, "skipping statement #{}: unexpected statement type {kind}", index + 1)
            }
            Diagnostic::EmptyStatement { index } => {
                write!(f, "skipping statement #{}: empty statement", index + 1)
            }
            Diagnostic::UnnamedTable { index } => {
                write!(f, "skipping statement #{}: CREATE TABLE without a name", index + 1)
            }
            Diagnostic::UnsupportedNode {
                table,
                column,
                kind,
            } => write!(f, "{table}.{column}: unhandled type name node {kind}"),
        }
    }
}

/// Variant name of a parse tree node, e.g. `InsertStmt`.
///
/// Formatting stops at the end of the name, so the node's fields are never
/// rendered.
pub(crate) fn node_kind(node: &NodeEnum) -> String {
    let mut name = VariantName(String::new());
    // The writer aborts the format once the name is complete.
    let _ = write!(name, "{node:?}");
    name.0
}

struct VariantName(String);

impl fmt::Write for VariantName {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match s.find(['(', ' ', '{']) {
            Some(end) => {
                self.0.push_str(&s[..end]);
                Err(fmt::Error)
            }
            None => {
                self.0.push_str(s);
                Ok(())
            }
        }
    }
}
