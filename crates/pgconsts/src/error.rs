//! Error types for pgconsts

use thiserror::Error;

/// Result type for pgconsts operations.
pub type GenResult<T> = Result<T, GenError>;

/// Fatal errors of the generation pipeline.
///
/// Unsupported statements and type-name nodes are not errors; they are
/// reported as [`Diagnostic`](crate::Diagnostic)s and skipped.
#[derive(Debug, Error)]
pub enum GenError {
    /// The SQL input could not be parsed.
    #[error("error parsing sql: {0}")]
    Parse(String),
    /// The template text is not a valid template.
    #[error("unable to parse template: {0}")]
    Template(#[source] minijinja::Error),
    /// The template failed while rendering the table data.
    #[error("error executing template: {0}")]
    Execution(#[source] minijinja::Error),
    /// The rendered text is not valid Rust source.
    #[error("generated bad code: {message}")]
    MalformedOutput {
        message: String,
        /// The unformatted template output, kept for diagnosis.
        raw: String,
    },
}

impl GenError {
    /// Raw rendered text attached to a [`GenError::MalformedOutput`].
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenError::MalformedOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
