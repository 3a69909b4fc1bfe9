//! Public AST types for parsed calls and pipelines.
//!
//! These types are public to enable external tooling (the CLI `parse`
//! command, linters, editors).

use serde::Serialize;

/// A single function or method invocation: `name(param, param, ...)`.
///
/// Parameters are already trimmed, unquoted, and placeholder-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCall {
    pub name: String,
    pub parameters: Vec<String>,
}

impl ParsedCall {
    /// Create a call with the given name and parameters.
    pub fn new(name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Create a zero-argument call.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// One step of a `$func:{{ step | step }}` pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineStep {
    /// A literal seed value (only ever the first step).
    Literal { value: String },
    /// A call; the first step is a base call, later steps are chained methods.
    Call(ParsedCall),
}

/// How pipeline bodies are split into steps on `|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineSplit {
    /// Track parentheses and quotes only.
    ///
    /// A `|` inside a bracketed, unquoted argument still splits the step.
    #[default]
    ParensOnly,
    /// Also track `[`/`]` and `{`/`}`, matching parameter splitting.
    ParensAndBrackets,
}
