//! funcx interpreter for evaluating call expressions.
//!
//! This module provides the expansion engine that takes `$func:` calls,
//! chains, and pipelines, dispatches them to a function registry, and splices
//! the results back into the text.

pub mod builtins;
mod engine;
mod error;
mod feedback;
mod options;
mod registry;

pub use engine::FunctionEngine;
pub use error::{EvalError, compute_suggestions};
pub use feedback::{CollectingFeedback, FeedbackSink, TracingFeedback};
pub use options::{EngineOptions, FailureMode};
pub use registry::{BaseFn, FunctionRegistry, MapRegistry, MethodFn};
