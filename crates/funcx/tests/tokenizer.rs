//! Integration tests for call and pipeline boundary detection.

use funcx::parser::{
    find_function_end, find_pipeline_end, is_known_base_function, parse_function_part,
    parse_pipeline, split_pipeline_steps,
};
use funcx::{Context, ParsedCall, PipelineSplit, PipelineStep, context};

// =============================================================================
// find_function_end
// =============================================================================

#[test]
fn call_ends_at_whitespace() {
    assert_eq!(find_function_end("guid() rest", 0), 6);
}

#[test]
fn whitespace_inside_parens_does_not_end_call() {
    assert_eq!(find_function_end("upper(\"a b\") x", 0), 12);
}

#[test]
fn call_ends_at_dollar() {
    assert_eq!(find_function_end("a$func:b", 0), 1);
    assert_eq!(find_function_end("guid()$(x)", 0), 6);
}

#[test]
fn dollar_inside_parens_does_not_end_call() {
    assert_eq!(find_function_end("echo($(x)) y", 0), 10);
}

#[test]
fn call_runs_to_end_of_text() {
    assert_eq!(find_function_end("now", 0), 3);
    assert_eq!(find_function_end("f(a b", 0), 5);
}

#[test]
fn call_end_respects_start_offset() {
    assert_eq!(find_function_end("x $func:guid()", 8), 14);
    assert_eq!(find_function_end("x $func:guid() y", 8), 14);
}

#[test]
fn stray_close_paren_does_not_go_negative() {
    assert_eq!(find_function_end("a) b", 0), 2);
}

// =============================================================================
// find_pipeline_end
// =============================================================================

#[test]
fn pipeline_end_finds_double_brace() {
    assert_eq!(find_pipeline_end(" \"a\" | upper() }} tail", 0), Some(15));
}

#[test]
fn pipeline_end_balances_inline_json() {
    assert_eq!(find_pipeline_end(r#"{"a":{"b":1}} | x }}"#, 0), Some(18));
}

#[test]
fn pipeline_end_skips_quoted_braces() {
    assert_eq!(find_pipeline_end("\"}}\" }}", 0), Some(5));
    assert_eq!(find_pipeline_end("'}}' }}", 0), Some(5));
}

#[test]
fn pipeline_end_respects_start_offset() {
    assert_eq!(find_pipeline_end("$func:{{ x }}", 8), Some(11));
    assert_eq!(find_pipeline_end("$func:{{}}", 8), Some(8));
}

#[test]
fn unterminated_pipeline_has_no_end() {
    assert_eq!(find_pipeline_end(" upper() }", 0), None);
    assert_eq!(find_pipeline_end(" \"}} ", 0), None);
    assert_eq!(find_pipeline_end("", 0), None);
}

// =============================================================================
// split_pipeline_steps
// =============================================================================

#[test]
fn splits_steps_on_pipes() {
    assert_eq!(
        split_pipeline_steps("\"a\" | upper() | substring(0,2)", PipelineSplit::ParensOnly),
        vec!["\"a\"", "upper()", "substring(0,2)"]
    );
}

#[test]
fn pipe_inside_quotes_or_parens_does_not_split() {
    assert_eq!(
        split_pipeline_steps("\"a|b\" | f(a|b) | g", PipelineSplit::ParensOnly),
        vec!["\"a|b\"", "f(a|b)", "g"]
    );
}

#[test]
fn pipe_inside_brackets_splits_by_default() {
    assert_eq!(
        split_pipeline_steps("[a|b] | upper()", PipelineSplit::ParensOnly),
        vec!["[a", "b]", "upper()"]
    );
}

#[test]
fn bracket_aware_split_keeps_bracketed_pipe() {
    assert_eq!(
        split_pipeline_steps("[a|b] | {x|y} | upper()", PipelineSplit::ParensAndBrackets),
        vec!["[a|b]", "{x|y}", "upper()"]
    );
}

#[test]
fn empty_steps_are_dropped() {
    assert_eq!(
        split_pipeline_steps(" | a || b | ", PipelineSplit::ParensOnly),
        vec!["a", "b"]
    );
    assert!(split_pipeline_steps("   ", PipelineSplit::ParensOnly).is_empty());
}

// =============================================================================
// parse_function_part
// =============================================================================

#[test]
fn function_part_with_arguments() {
    let call = parse_function_part("string.substring(0, 2)", &Context::new());
    assert_eq!(
        call,
        ParsedCall::new("string.substring", vec!["0".into(), "2".into()])
    );
}

#[test]
fn function_part_without_parens_is_zero_argument() {
    assert_eq!(
        parse_function_part("  guid  ", &Context::new()),
        ParsedCall::bare("guid")
    );
}

#[test]
fn text_after_matching_paren_is_ignored() {
    assert_eq!(
        parse_function_part("f(a) trailing", &Context::new()),
        ParsedCall::new("f", vec!["a".into()])
    );
}

#[test]
fn unbalanced_function_part_drops_last_character() {
    assert_eq!(
        parse_function_part("f(a, b", &Context::new()),
        ParsedCall::new("f", vec!["a".into()])
    );
}

#[test]
fn function_part_resolves_placeholders() {
    let ctx = context! { "n" => "5" };
    assert_eq!(
        parse_function_part("math.abs($(n))", &ctx),
        ParsedCall::new("math.abs", vec!["5".into()])
    );
}

// =============================================================================
// is_known_base_function
// =============================================================================

#[test]
fn known_base_functions() {
    assert!(is_known_base_function("today"));
    assert!(is_known_base_function("NOW"));
    assert!(is_known_base_function(" guid "));
    assert!(is_known_base_function("string.upper"));
    assert!(is_known_base_function("Hash.md5"));
    assert!(!is_known_base_function("upper"));
    assert!(!is_known_base_function("hello"));
}

// =============================================================================
// parse_pipeline
// =============================================================================

fn literal(value: &str) -> PipelineStep {
    PipelineStep::Literal {
        value: value.to_string(),
    }
}

#[test]
fn quoted_first_step_is_a_literal() {
    let steps = parse_pipeline(
        "\"abc\" | string.upper()",
        &Context::new(),
        PipelineSplit::ParensOnly,
    );
    assert_eq!(
        steps,
        vec![
            literal("abc"),
            PipelineStep::Call(ParsedCall::bare("string.upper")),
        ]
    );
}

#[test]
fn bare_word_first_step_is_a_literal() {
    let steps = parse_pipeline("hello | upper", &Context::new(), PipelineSplit::ParensOnly);
    assert_eq!(
        steps,
        vec![literal("hello"), PipelineStep::Call(ParsedCall::bare("upper"))]
    );
}

#[test]
fn known_base_function_first_step_is_a_call() {
    let steps = parse_pipeline("guid | upper", &Context::new(), PipelineSplit::ParensOnly);
    assert_eq!(
        steps,
        vec![
            PipelineStep::Call(ParsedCall::bare("guid")),
            PipelineStep::Call(ParsedCall::bare("upper")),
        ]
    );
}

#[test]
fn first_step_with_parens_is_a_call() {
    let steps = parse_pipeline("echo(x) | wrap()", &Context::new(), PipelineSplit::ParensOnly);
    assert_eq!(
        steps[0],
        PipelineStep::Call(ParsedCall::new("echo", vec!["x".into()]))
    );
}

#[test]
fn placeholder_literal_is_resolved() {
    let ctx = context! { "clip" => "  x " };
    let steps = parse_pipeline("$(clip) | trim()", &ctx, PipelineSplit::ParensOnly);
    assert_eq!(steps[0], literal("  x "));
}

#[test]
fn quoted_placeholder_literal_keeps_its_quotes() {
    let ctx = context! { "name" => "bob" };
    let steps = parse_pipeline("\"$(name)\" | upper()", &ctx, PipelineSplit::ParensOnly);
    assert_eq!(steps[0], literal("\"bob\""));
}

#[test]
fn empty_body_has_no_steps() {
    assert!(parse_pipeline("  ", &Context::new(), PipelineSplit::ParensOnly).is_empty());
}
