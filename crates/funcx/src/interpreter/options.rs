//! Engine configuration.

use bon::Builder;

use crate::parser::PipelineSplit;

/// What replaces an expression whose evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Leave the original `$func:...` text in place.
    KeepOriginal,
    /// Substitute an empty string.
    Empty,
}

/// Tunable expansion behavior.
///
/// The defaults reproduce the established behavior: failed plain calls keep
/// their text, failed pipelines collapse to an empty string, and pipeline
/// steps are split with parentheses and quotes only.
///
/// # Example
///
/// ```
/// use funcx::{EngineOptions, FailureMode, PipelineSplit};
///
/// let options = EngineOptions::builder()
///     .pipeline_failure(FailureMode::KeepOriginal)
///     .pipeline_split(PipelineSplit::ParensAndBrackets)
///     .build();
///
/// assert_eq!(options.call_failure, FailureMode::KeepOriginal);
/// assert_eq!(options.pipeline_failure, FailureMode::KeepOriginal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct EngineOptions {
    /// Replacement for a failed `$func:name(...)` call.
    #[builder(default = FailureMode::KeepOriginal)]
    pub call_failure: FailureMode,

    /// Replacement for a failed `$func:{{ ... }}` pipeline.
    #[builder(default = FailureMode::Empty)]
    pub pipeline_failure: FailureMode,

    /// How pipeline bodies are split into steps.
    #[builder(default)]
    pub pipeline_split: PipelineSplit,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions::builder().build()
    }
}
