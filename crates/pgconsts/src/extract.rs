//! Reduce parsed SQL statements to [`Table`] records.

use crate::diagnostic::Diagnostic;
use crate::error::{GenError, GenResult};
use crate::model::{Column, Table, TableAllowlist};
use crate::type_name::render_type_name;
use pg_query::NodeEnum;
use pg_query::protobuf::CreateStmt;

/// Tables found in a statement list, plus what was skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub tables: Vec<Table>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse SQL text into top-level statements, each wrapped in a `RawStmt`.
pub fn parse_statements(sql: &str) -> GenResult<Vec<NodeEnum>> {
    let parsed = pg_query::parse(sql).map_err(|e| GenError::Parse(e.to_string()))?;

    Ok(parsed
        .protobuf
        .stmts
        .into_iter()
        .map(|raw| NodeEnum::RawStmt(raw.into()))
        .collect())
}

/// Collect every `CREATE TABLE` accepted by `allowlist`, in input order.
///
/// Statements may be bare `CreateStmt` nodes or wrapped in `RawStmt`. Anything
/// else is recorded as [`Diagnostic::UnsupportedStatement`] and skipped, as are
/// empty wrappers and tables without a name.
pub fn extract_tables<'a, I>(statements: I, allowlist: &TableAllowlist) -> Extraction
where
    I: IntoIterator<Item = &'a NodeEnum>,
{
    let mut out = Extraction::default();

    for (index, stmt) in statements.into_iter().enumerate() {
        let create = match stmt {
            NodeEnum::RawStmt(raw) => match raw.stmt.as_deref().and_then(|n| n.node.as_ref()) {
                Some(NodeEnum::CreateStmt(create)) => create,
                Some(other) => {
                    out.diagnostics
                        .push(Diagnostic::unsupported_statement(index, other));
                    continue;
                }
                None => {
                    out.diagnostics.push(Diagnostic::empty_statement(index));
                    continue;
                }
            },
            NodeEnum::CreateStmt(create) => create,
            other => {
                out.diagnostics
                    .push(Diagnostic::unsupported_statement(index, other));
                continue;
            }
        };

        let Some(relation) = create.relation.as_ref().filter(|r| !r.relname.is_empty()) else {
            out.diagnostics.push(Diagnostic::unnamed_table(index));
            continue;
        };
        let table_name = relation.relname.as_str();
        if !allowlist.allows(table_name) {
            tracing::debug!(table = table_name, "table not in allowlist, skipping");
            continue;
        }

        let mut table = table_from_create(create, &mut out.diagnostics);
        if !relation.schemaname.is_empty() {
            table.schema = Some(relation.schemaname.clone());
        }
        tracing::debug!(
            table = table.name.as_str(),
            columns = table.columns.len(),
            "extracted table"
        );
        out.tables.push(table);
    }

    out
}

fn table_from_create(create: &CreateStmt, diagnostics: &mut Vec<Diagnostic>) -> Table {
    let table_name = create
        .relation
        .as_ref()
        .map(|r| r.relname.clone())
        .unwrap_or_default();
    let mut table = Table::new(table_name);

    for elt in &create.table_elts {
        let Some(NodeEnum::ColumnDef(col)) = elt.node.as_ref() else {
            // Table constraints, LIKE clauses, ...
            tracing::trace!(table = table.name.as_str(), "skipping non-column element");
            continue;
        };

        let sql_type = match col.type_name.as_ref() {
            Some(type_name) => render_type_name(&type_name.names, |node| {
                diagnostics.push(Diagnostic::unsupported_node(
                    &table.name,
                    &col.colname,
                    node,
                ));
            }),
            None => String::new(),
        };

        table.columns.push(Column {
            name: col.colname.clone(),
            sql_type,
        });
    }

    table
}
