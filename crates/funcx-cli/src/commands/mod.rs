//! CLI command implementations.

mod expand;
mod functions;
mod parse;

use std::env;

use clap::ValueEnum;
use funcx::{FailureMode, MapRegistry, PipelineSplit, Value, builtins};

pub use expand::{ExpandArgs, run_expand};
pub use functions::{FunctionsArgs, run_functions};
pub use parse::{ParseArgs, run_parse};

/// Replacement for an expression that failed to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailureArg {
    /// Leave the original text in place
    Keep,
    /// Replace it with nothing
    Empty,
}

impl From<FailureArg> for FailureMode {
    fn from(arg: FailureArg) -> Self {
        match arg {
            FailureArg::Keep => FailureMode::KeepOriginal,
            FailureArg::Empty => FailureMode::Empty,
        }
    }
}

/// Pipeline step splitting for `--bracket-aware-pipelines`.
fn pipeline_split(bracket_aware: bool) -> PipelineSplit {
    if bracket_aware {
        PipelineSplit::ParensAndBrackets
    } else {
        PipelineSplit::ParensOnly
    }
}

/// The functions available from the command line: the string family plus
/// environment lookups.
fn cli_registry() -> MapRegistry {
    let mut registry = builtins::string_functions();
    registry
        .register("env", |params| {
            let name = params.first().map_or("", String::as_str);
            Ok(Value::String(env::var(name).unwrap_or_default()))
        })
        .register("username", |_| Ok(Value::String(first_env(&["USER", "USERNAME"]))))
        .register("computername", |_| {
            Ok(Value::String(first_env(&["HOSTNAME", "COMPUTERNAME"])))
        });
    registry
}

fn first_env(names: &[&str]) -> String {
    names
        .iter()
        .find_map(|name| env::var(name).ok())
        .unwrap_or_default()
}
