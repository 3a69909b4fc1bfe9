//! Implementation of the `funcx parse` command.

use std::path::PathBuf;

use funcx::parser::{find_pipeline_end, parse_call_text, parse_pipeline};
use funcx::{Context, PipelineSplit, PipelineStep};
use miette::IntoDiagnostic;
use serde::Serialize;

use super::pipeline_split;
use crate::context::{build_context, parse_key_val};
use crate::output::context_report;
use crate::output::table::format_steps_table;

/// Arguments for the parse command.
#[derive(Debug, clap::Args)]
pub struct ParseArgs {
    /// Expression to parse, e.g. '$func:string.upper(x).trim()' or
    /// '$func:{{ "a" | upper() }}'. The '$func:' marker is optional.
    pub expression: String,

    /// Context values in key=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// JSON object file with context values; -p values take precedence
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Treat '|' inside [...] and {...} as part of a pipeline argument
    #[arg(long)]
    pub bracket_aware_pipelines: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Shape of a parsed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    Call,
    Pipeline,
}

/// JSON output for parse results.
#[derive(Debug, Serialize)]
pub struct ParseResult {
    pub kind: ExpressionKind,
    pub steps: Vec<PipelineStep>,
}

/// Run the parse command.
pub fn run_parse(args: ParseArgs) -> miette::Result<i32> {
    let context = build_context(args.context.as_deref(), &args.params).map_err(context_report)?;
    let parsed = parse_expression(
        &args.expression,
        &context,
        pipeline_split(args.bracket_aware_pipelines),
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&parsed).into_diagnostic()?
        );
    } else {
        let kind = match parsed.kind {
            ExpressionKind::Call => "call",
            ExpressionKind::Pipeline => "pipeline",
        };
        println!("{kind}");
        println!("{}", format_steps_table(&parsed.steps));
    }

    let nameless = parsed
        .steps
        .iter()
        .any(|step| matches!(step, PipelineStep::Call(call) if call.name.is_empty()));
    if nameless || (parsed.kind == ExpressionKind::Call && parsed.steps.is_empty()) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Classify and split one expression the way the engine would.
fn parse_expression(expression: &str, context: &Context, split: PipelineSplit) -> ParseResult {
    let text = expression.trim();
    let text = text.strip_prefix("$func:").unwrap_or(text);

    if let Some(body) = text.strip_prefix("{{") {
        let body = match find_pipeline_end(body, 0) {
            Some(end) => &body[..end],
            None => body,
        };
        return ParseResult {
            kind: ExpressionKind::Pipeline,
            steps: parse_pipeline(body, context, split),
        };
    }

    ParseResult {
        kind: ExpressionKind::Call,
        steps: parse_call_text(text, context)
            .into_iter()
            .map(PipelineStep::Call)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use funcx::{ParsedCall, context};

    use super::*;

    fn parse(expression: &str) -> ParseResult {
        parse_expression(expression, &Context::new(), PipelineSplit::ParensOnly)
    }

    #[test]
    fn marker_is_optional() {
        let with = parse("$func:guid()");
        let without = parse("guid()");
        assert_eq!(with.steps, without.steps);
        assert_eq!(with.kind, ExpressionKind::Call);
    }

    #[test]
    fn prefixed_chain_is_split() {
        let parsed = parse("$func:string.upper(x).trim()");
        assert_eq!(
            parsed.steps,
            vec![
                PipelineStep::Call(ParsedCall::new("string.upper", vec!["x".to_string()])),
                PipelineStep::Call(ParsedCall::bare("trim")),
            ]
        );
    }

    #[test]
    fn pipeline_body_stops_at_terminator() {
        let parsed = parse(r#"$func:{{ "a" | upper() }} trailing"#);
        assert_eq!(parsed.kind, ExpressionKind::Pipeline);
        assert_eq!(
            parsed.steps,
            vec![
                PipelineStep::Literal {
                    value: "a".to_string()
                },
                PipelineStep::Call(ParsedCall::bare("upper")),
            ]
        );
    }

    #[test]
    fn placeholders_resolve_in_parameters() {
        let ctx = context! { "who" => "bob" };
        let parsed = parse_expression("greet($(who))", &ctx, PipelineSplit::ParensOnly);
        assert_eq!(
            parsed.steps,
            vec![PipelineStep::Call(ParsedCall::new("greet", vec!["bob".to_string()]))]
        );
    }
}
