//! Implementation of the `funcx expand` command.

use std::path::PathBuf;

use clap::ValueEnum;
use funcx::parser::resolve_placeholders;
use funcx::{CollectingFeedback, EngineOptions, FunctionEngine};
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::debug;

use super::{FailureArg, cli_registry, pipeline_split};
use crate::context::{build_context, parse_key_val};
use crate::output::context_report;

/// Arguments for the expand command.
#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Template string to expand
    #[arg(long, required = true)]
    pub template: String,

    /// Context values in key=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// JSON object file with context values; -p values take precedence
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Which expansion passes to run
    #[arg(long, value_enum, default_value_t = Pass::All)]
    pub pass: Pass,

    /// Replacement for a failed $func:name(...) call
    #[arg(long, value_enum, default_value_t = FailureArg::Keep)]
    pub call_failure: FailureArg,

    /// Replacement for a failed $func:{{ ... }} pipeline
    #[arg(long, value_enum, default_value_t = FailureArg::Empty)]
    pub pipeline_failure: FailureArg,

    /// Treat '|' inside [...] and {...} as part of a pipeline argument
    #[arg(long)]
    pub bracket_aware_pipelines: bool,

    /// Substitute remaining $(key) placeholders after expansion
    #[arg(long)]
    pub resolve_placeholders: bool,

    /// Exit with a non-zero code if any expression failed
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Expansion passes selectable with `--pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pass {
    /// Calls, then pipelines
    All,
    /// Plain calls and chains only
    Calls,
    /// Pipelines only
    Pipelines,
}

/// JSON output for expand results.
#[derive(Debug, Serialize)]
pub struct ExpandResult {
    pub result: String,
    pub errors: Vec<String>,
}

/// Run the expand command.
pub fn run_expand(args: ExpandArgs) -> miette::Result<i32> {
    let context = build_context(args.context.as_deref(), &args.params).map_err(context_report)?;

    let options = EngineOptions::builder()
        .call_failure(args.call_failure.into())
        .pipeline_failure(args.pipeline_failure.into())
        .pipeline_split(pipeline_split(args.bracket_aware_pipelines))
        .build();
    let registry = cli_registry();
    let feedback = CollectingFeedback::new();
    let engine = FunctionEngine::new(&registry)
        .with_feedback(&feedback)
        .with_options(options);

    debug!(
        pass = ?args.pass,
        options = ?engine.options(),
        params = context.len(),
        "expanding template"
    );
    let mut result = match args.pass {
        Pass::All => engine.expand(&args.template, &context),
        Pass::Calls => engine.expand_calls(&args.template, &context),
        Pass::Pipelines => engine.expand_pipelines(&args.template, &context),
    };
    if args.resolve_placeholders {
        result = resolve_placeholders(&result, &context);
    }
    let errors = feedback.take();
    let failed = !errors.is_empty();

    if args.json {
        let output = ExpandResult { result, errors };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        println!("{result}");
        for error in &errors {
            eprintln!(
                "{}: {error}",
                "warning".if_supports_color(Stream::Stderr, |t| t.yellow())
            );
        }
    }

    if args.strict && failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
