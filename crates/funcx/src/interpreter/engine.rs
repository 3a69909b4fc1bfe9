//! Expansion engine for `$func:` calls and `$func:{{ ... }}` pipelines.
//!
//! The engine makes two independent passes over a string. The call pass
//! replaces `$func:name(args)` and dotted chains; the pipeline pass replaces
//! `$func:{{ step | step }}` blocks. Replacement text is never rescanned by
//! the pass that produced it.

use tracing::{debug, trace};

use crate::interpreter::error::EvalError;
use crate::interpreter::feedback::{FeedbackSink, TracingFeedback};
use crate::interpreter::options::{EngineOptions, FailureMode};
use crate::interpreter::registry::FunctionRegistry;
use crate::parser::{
    ParsedCall, PipelineStep, find_function_end, find_pipeline_end, parse_call_text,
    parse_pipeline,
};
use crate::types::{Context, Value};

const CALL_MARKER: &str = "$func:";
const PIPELINE_MARKER: &str = "$func:{{";
const PIPELINE_TERMINATOR: &str = "}}";

/// Expands function expressions against a [`FunctionRegistry`].
///
/// The engine borrows its registry and feedback sink and holds no mutable
/// state, so one engine can serve many threads at once.
///
/// # Example
///
/// ```
/// use funcx::{FunctionEngine, builtins, context};
///
/// let registry = builtins::string_functions();
/// let engine = FunctionEngine::new(&registry);
/// let ctx = context! { "name" => "world" };
///
/// let out = engine.expand(r#"$func:string.upper("$(name)") says $func:{{ "hi" | upper() }}"#, &ctx);
/// assert_eq!(out, "WORLD says HI");
/// ```
pub struct FunctionEngine<'a> {
    registry: &'a dyn FunctionRegistry,
    feedback: &'a dyn FeedbackSink,
    options: EngineOptions,
}

impl<'a> FunctionEngine<'a> {
    /// Create an engine with default options that reports through `tracing`.
    pub fn new(registry: &'a dyn FunctionRegistry) -> Self {
        Self {
            registry,
            feedback: &TracingFeedback,
            options: EngineOptions::default(),
        }
    }

    /// Report evaluation failures to `feedback` instead of `tracing`.
    pub fn with_feedback(mut self, feedback: &'a dyn FeedbackSink) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Run the call pass, then the pipeline pass.
    ///
    /// `$(key)` placeholders outside of any call are left for the caller.
    pub fn expand(&self, input: &str, context: &Context) -> String {
        let calls_expanded = self.expand_calls(input, context);
        self.expand_pipelines(&calls_expanded, context)
    }

    /// Replace every plain `$func:` call and call chain.
    ///
    /// `$func:{{` pipeline markers are stepped over untouched. A call that
    /// fails is reported once and replaced according to
    /// [`EngineOptions::call_failure`].
    pub fn expand_calls(&self, input: &str, context: &Context) -> String {
        if !input.contains(CALL_MARKER) {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut cursor = 0;
        while let Some(found) = input[cursor..].find(CALL_MARKER) {
            let start = cursor + found;
            let call_start = start + CALL_MARKER.len();

            if input[call_start..].starts_with("{{") {
                let skip_to = call_start + 2;
                output.push_str(&input[cursor..skip_to]);
                cursor = skip_to;
                continue;
            }

            let end = find_function_end(input, call_start);
            output.push_str(&input[cursor..start]);
            let original = &input[start..end];
            match self.evaluate_call(&input[call_start..end], context) {
                Ok(value) => output.push_str(&value.into_text()),
                Err(err) => {
                    self.report(original, &err);
                    if self.options.call_failure == FailureMode::KeepOriginal {
                        output.push_str(original);
                    }
                }
            }
            cursor = end;
        }
        output.push_str(&input[cursor..]);
        output
    }

    /// Replace every closed `$func:{{ ... }}` pipeline.
    ///
    /// Scanning stops at the first pipeline without a closing `}}`; it and
    /// everything after it are copied through unchanged. A pipeline that
    /// fails is reported once and replaced according to
    /// [`EngineOptions::pipeline_failure`].
    pub fn expand_pipelines(&self, input: &str, context: &Context) -> String {
        if !input.contains(PIPELINE_MARKER) {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut cursor = 0;
        while let Some(found) = input[cursor..].find(PIPELINE_MARKER) {
            let start = cursor + found;
            let body_start = start + PIPELINE_MARKER.len();
            let Some(end) = find_pipeline_end(input, body_start) else {
                trace!(offset = start, "unterminated pipeline left as-is");
                break;
            };
            let block_end = end + PIPELINE_TERMINATOR.len();

            output.push_str(&input[cursor..start]);
            match self.evaluate_pipeline(&input[body_start..end], context) {
                Ok(value) => output.push_str(&value.into_text()),
                Err(err) => {
                    let original = &input[start..block_end];
                    self.report(original, &err);
                    if self.options.pipeline_failure == FailureMode::KeepOriginal {
                        output.push_str(original);
                    }
                }
            }
            cursor = block_end;
        }
        output.push_str(&input[cursor..]);
        output
    }

    /// Evaluate the text after `$func:` of a plain call or chain.
    ///
    /// The text is split into calls with [`parse_call_text`]; the first is a
    /// base call and each later one is chained onto the previous result.
    pub fn evaluate_call(&self, call_text: &str, context: &Context) -> Result<Value, EvalError> {
        let text = call_text.trim();
        trace!(text, "evaluate call");
        self.run_chain(text, parse_call_text(text, context))
    }

    /// Evaluate the body of a `$func:{{ ... }}` pipeline.
    ///
    /// The first step seeds the running value, either as a literal or as a
    /// base call; each later step is applied as a chained method. A body with
    /// no steps evaluates to an empty string.
    pub fn evaluate_pipeline(&self, body: &str, context: &Context) -> Result<Value, EvalError> {
        let mut steps = parse_pipeline(body, context, self.options.pipeline_split).into_iter();
        let mut value = match steps.next() {
            None => return Ok(Value::String(String::new())),
            Some(PipelineStep::Literal { value }) => Value::String(value),
            Some(PipelineStep::Call(call)) => self.call_base(body, &call)?,
        };

        for step in steps {
            value = match step {
                PipelineStep::Call(call) => self.call_chained(value, &call)?,
                PipelineStep::Literal { value } => Value::String(value),
            };
        }
        Ok(value)
    }

    fn run_chain(&self, text: &str, calls: Vec<ParsedCall>) -> Result<Value, EvalError> {
        let mut calls = calls.into_iter();
        let Some(first) = calls.next() else {
            return Err(EvalError::EmptyCall {
                text: text.to_string(),
            });
        };

        let mut value = self.call_base(text, &first)?;
        for call in calls {
            value = self.call_chained(value, &call)?;
        }
        Ok(value)
    }

    fn call_base(&self, text: &str, call: &ParsedCall) -> Result<Value, EvalError> {
        if call.name.is_empty() {
            return Err(EvalError::EmptyCall {
                text: text.to_string(),
            });
        }
        debug!(name = %call.name, parameters = call.parameters.len(), "base call");
        self.registry.evaluate_base(&call.name, &call.parameters)
    }

    fn call_chained(&self, receiver: Value, call: &ParsedCall) -> Result<Value, EvalError> {
        debug!(name = %call.name, parameters = call.parameters.len(), "chained call");
        self.registry
            .evaluate_chained(receiver, &call.name, &call.parameters)
    }

    fn report(&self, original: &str, err: &EvalError) {
        self.feedback
            .report_error(&format!("failed to expand '{original}': {err}"));
    }
}
