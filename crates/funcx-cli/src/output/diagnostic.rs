//! Miette diagnostic wrapper for context file errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::context::ContextError;

/// A miette-compatible diagnostic pointing into a malformed context file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid context file: {message}")]
#[diagnostic(
    code(funcx::context),
    help("the context file must be a flat JSON object such as {{\"name\": \"value\"}}")
)]
pub struct ContextDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl ContextDiagnostic {
    /// Create a diagnostic from a JSON error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        let offset = line_column_offset(content, err.line(), err.column());
        ContextDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
        }
    }
}

/// Turn a [`ContextError`] into a report, with source context when the file
/// failed to parse.
pub fn context_report(err: ContextError) -> Report {
    match err {
        ContextError::Json {
            path,
            content,
            source,
        } => ContextDiagnostic::from_json_error(&path, &content, &source).into(),
        other => Report::new(other),
    }
}

/// Byte offset of a 1-based line and column, clamped to the content.
fn line_column_offset(content: &str, line: usize, column: usize) -> usize {
    let offset = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        + column.saturating_sub(1);
    offset.min(content.len().saturating_sub(1))
}
