use crate::error::{GenError, GenResult};
use std::fmt;

/// Why a formatter rejected its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub message: String,
    /// 1-based line and column of the problem, when known.
    pub location: Option<(usize, usize)>,
}

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some((line, column)) => write!(f, "{line}:{column}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for FormatError {}

/// Canonical formatter for generated source.
///
/// Formatting doubles as validation: input that is not well-formed source
/// must be rejected.
pub trait SourceFormatter {
    fn format_source(&self, source: &str) -> Result<String, FormatError>;
}

/// Parses Rust with `syn` and prints it with `prettyplease`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFormatter;

impl SourceFormatter for RustFormatter {
    fn format_source(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source).map_err(|e| {
            let start = e.span().start();
            FormatError {
                message: e.to_string(),
                location: Some((start.line, start.column + 1)),
            }
        })?;
        Ok(prettyplease::unparse(&file))
    }
}

/// Canonicalize `rendered`, or fail with the raw text attached.
pub fn verify(rendered: &str, formatter: &dyn SourceFormatter) -> GenResult<String> {
    formatter
        .format_source(rendered)
        .map_err(|e| GenError::MalformedOutput {
            message: e.to_string(),
            raw: rendered.to_string(),
        })
}
