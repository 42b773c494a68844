//! pgconsts
//!
//! Generate Rust constants for the table and column names declared by
//! PostgreSQL `CREATE TABLE` statements, so queries can reference
//! `models::Users.Email` instead of a hand-typed `"email"`.
//!
//! The pipeline is linear:
//!
//! 1. [`parse_statements`]: SQL text to `pg_query` statements
//! 2. [`extract_tables`]: statements to [`Table`]s, filtered by a [`TableAllowlist`]
//! 3. [`render`]: a [`GenerationRequest`] through [`DEFAULT_TEMPLATE`] or a user template
//! 4. [`verify`]: the rendered text through a [`SourceFormatter`]
//!
//! [`generate_source`] runs all of it.
//!
//! # Example
//!
//! ```ignore
//! use pgconsts::{GenerateOptions, RustFormatter, generate_source};
//!
//! let sql = "CREATE TABLE users (id int4, email text);";
//! let out = generate_source(sql, &GenerateOptions::default(), &RustFormatter)?;
//! assert!(out.code.contains("pub const Users: UsersColumns"));
//! # Ok::<(), pgconsts::GenError>(())
//! ```

pub mod diagnostic;
pub mod error;
pub mod extract;
pub mod model;
pub mod naming;
pub mod template;
pub mod type_name;
pub mod verify;

pub use diagnostic::Diagnostic;
pub use error::{GenError, GenResult};
pub use extract::{Extraction, extract_tables, parse_statements};
pub use model::{Column, GenerationRequest, Table, TableAllowlist};
pub use naming::{export_ident, export_name, rust_str};
pub use template::{DEFAULT_TEMPLATE, TemplateFn, TemplateFunctions, render};
pub use type_name::render_type_name;
pub use verify::{FormatError, RustFormatter, SourceFormatter, verify};

/// Package name used when none is configured.
pub const DEFAULT_PACKAGE: &str = "models";

/// Settings for one [`generate_source`] run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub package: String,
    pub allowlist: TableAllowlist,
    /// Template text; `None` uses [`DEFAULT_TEMPLATE`].
    pub template: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            allowlist: TableAllowlist::all(),
            template: None,
        }
    }
}

/// Result of a successful [`generate_source`] run.
#[derive(Debug, Clone)]
pub struct GeneratedSource {
    /// Formatted source text.
    pub code: String,
    /// Number of tables passed to the template.
    pub table_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `sql`, extract its tables, render them and verify the result.
pub fn generate_source(
    sql: &str,
    options: &GenerateOptions,
    formatter: &dyn SourceFormatter,
) -> GenResult<GeneratedSource> {
    let statements = parse_statements(sql)?;
    let Extraction {
        tables,
        diagnostics,
    } = extract_tables(&statements, &options.allowlist);
    let table_count = tables.len();
    tracing::debug!(tables = table_count, "extracted schema");

    let request = GenerationRequest::new(options.package.clone(), tables);
    let template_text = options.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    let rendered = render(&request, template_text, &TemplateFunctions::standard())?;
    let code = verify(&rendered, formatter)?;

    Ok(GeneratedSource {
        code,
        table_count,
        diagnostics,
    })
}
