pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    CollectingFeedback, EngineOptions, EvalError, FailureMode, FeedbackSink, FunctionEngine,
    FunctionRegistry, MapRegistry, TracingFeedback, builtins, compute_suggestions,
};
pub use parser::{ParsedCall, PipelineSplit, PipelineStep};
pub use types::{Context, Value};

/// Creates a [`Context`] from key-value pairs.
///
/// Values are converted with `ToString`, so integers and other displayable
/// values can be passed directly.
///
/// # Example
///
/// ```
/// use funcx::context;
///
/// let ctx = context! { "user" => "alice", "count" => 3 };
/// assert_eq!(ctx.len(), 2);
/// assert_eq!(ctx["count"], "3");
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Context::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Context::new();
            $(
                map.insert(
                    ::std::string::ToString::to_string(&$key),
                    ::std::string::ToString::to_string(&$value),
                );
            )+
            map
        }
    };
}
