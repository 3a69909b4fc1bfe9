//! Integration tests for the plain-call expansion pass.

use std::thread;

use funcx::{
    CollectingFeedback, Context, EngineOptions, EvalError, FailureMode, FunctionEngine,
    MapRegistry, Value, builtins, context,
};

fn registry() -> MapRegistry {
    let mut registry = builtins::string_functions();
    registry
        .register("guid", |_| Ok(Value::from("1234")))
        .register("today", |_| Ok(Value::from("2024-01-15")))
        .register("echo", |params| Ok(Value::from(params.join("|"))))
        .register("count", |params| Ok(Value::from(params.len())))
        .register("fail", |_| {
            Err(EvalError::Failed {
                name: "fail".into(),
                message: "boom".into(),
            })
        })
        .register_method("wrap", |receiver, _| {
            Ok(Value::from(format!("[{receiver}]")))
        });
    registry
}

fn expand(input: &str, ctx: &Context) -> (String, Vec<String>) {
    let registry = registry();
    let feedback = CollectingFeedback::new();
    let engine = FunctionEngine::new(&registry).with_feedback(&feedback);
    let output = engine.expand_calls(input, ctx);
    (output, feedback.take())
}

fn expand_ok(input: &str) -> String {
    let (output, errors) = expand(input, &Context::new());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    output
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn text_without_calls_is_unchanged() {
    assert_eq!(expand_ok("plain $(x) text"), "plain $(x) text");
    assert_eq!(expand_ok(""), "");
    assert_eq!(expand_ok("$func"), "$func");
}

#[test]
fn pipeline_markers_are_left_for_the_pipeline_pass() {
    let input = "$func:{{ \"a\" | upper() }}";
    assert_eq!(expand_ok(input), input);
}

// =============================================================================
// Single calls
// =============================================================================

#[test]
fn call_with_empty_parens() {
    assert_eq!(expand_ok("id=$func:guid()"), "id=1234");
}

#[test]
fn bare_call_without_parens() {
    assert_eq!(expand_ok("$func:guid rest"), "1234 rest");
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(expand_ok("$func:GUID()"), "1234");
}

#[test]
fn parameters_are_split_and_resolved() {
    let ctx = context! { "a" => "1" };
    let (output, errors) = expand("$func:echo($(a), \"b c\", [x, y])", &ctx);
    assert_eq!(output, "1|b c|[x, y]");
    assert!(errors.is_empty());
}

#[test]
fn non_string_results_are_stringified() {
    assert_eq!(expand_ok("$func:count(a, b, c)"), "3");
    assert_eq!(expand_ok("$func:string.contains(abc, b)"), "true");
}

#[test]
fn namespaced_call_with_one_dot() {
    assert_eq!(expand_ok("$func:string.upper(\"abc\")"), "ABC");
}

// =============================================================================
// Chains
// =============================================================================

#[test]
fn namespaced_chain() {
    assert_eq!(expand_ok("$func:string.upper(\" hi \").trim()"), "HI");
}

#[test]
fn namespaced_call_with_dotted_argument() {
    assert_eq!(
        expand_ok("$func:string.replace(\"a.b.c\", \".\", \"-\")"),
        "a-b-c"
    );
}

#[test]
fn plain_chain_threads_the_result() {
    assert_eq!(expand_ok("$func:guid.wrap()"), "[1234]");
    assert_eq!(expand_ok("$func:echo(ab).reverse().wrap()"), "[ba]");
}

#[test]
fn chained_method_falls_back_to_base_function() {
    assert_eq!(expand_ok("$func:today.echo(x)"), "2024-01-15|x");
}

// =============================================================================
// Splicing
// =============================================================================

#[test]
fn several_calls_in_one_string() {
    assert_eq!(
        expand_ok("a $func:guid() b $func:string.lower(\"X\") c"),
        "a 1234 b x c"
    );
}

#[test]
fn adjacent_calls() {
    assert_eq!(expand_ok("$func:guid()$func:guid()"), "12341234");
}

#[test]
fn replacement_text_is_not_rescanned() {
    assert_eq!(expand_ok("$func:echo(\"$func:guid()\")"), "$func:guid()");
}

#[test]
fn call_followed_by_placeholder() {
    let ctx = context! { "x" => "X" };
    let (output, _) = expand("$func:guid()$(x)", &ctx);
    assert_eq!(output, "1234$(x)");
}

#[test]
fn multibyte_text_around_calls() {
    assert_eq!(expand_ok("é $func:guid() ü"), "é 1234 ü");
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn failing_call_keeps_original_text() {
    let (output, errors) = expand("x $func:fail(1) y", &Context::new());
    assert_eq!(output, "x $func:fail(1) y");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("boom"), "got: {}", errors[0]);
}

#[test]
fn unknown_function_reports_suggestion() {
    let (output, errors) = expand("$func:gudi()", &Context::new());
    assert_eq!(output, "$func:gudi()");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unknown function 'gudi'"), "got: {}", errors[0]);
    assert!(errors[0].contains("did you mean: guid?"), "got: {}", errors[0]);
}

#[test]
fn failing_chain_keeps_whole_chain() {
    let (output, errors) = expand("$func:guid.nosuch() end", &Context::new());
    assert_eq!(output, "$func:guid.nosuch() end");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unknown method 'nosuch'"), "got: {}", errors[0]);
}

#[test]
fn empty_call_is_reported_and_kept() {
    let (output, errors) = expand("$func: x", &Context::new());
    assert_eq!(output, "$func: x");
    assert_eq!(errors.len(), 1);
}

#[test]
fn one_failure_does_not_stop_later_calls() {
    let (output, errors) = expand("$func:fail() $func:guid()", &Context::new());
    assert_eq!(output, "$func:fail() 1234");
    assert_eq!(errors.len(), 1);
}

#[test]
fn engine_reports_its_options() {
    let registry = registry();
    let engine = FunctionEngine::new(&registry);
    assert_eq!(*engine.options(), EngineOptions::default());
    assert_eq!(engine.options().call_failure, FailureMode::KeepOriginal);
    assert_eq!(engine.options().pipeline_failure, FailureMode::Empty);

    let options = EngineOptions::builder()
        .call_failure(FailureMode::Empty)
        .build();
    let engine = engine.with_options(options);
    assert_eq!(engine.options().call_failure, FailureMode::Empty);
    assert_eq!(engine.options().pipeline_failure, FailureMode::Empty);
}

#[test]
fn empty_failure_mode_drops_failed_calls() {
    let registry = registry();
    let feedback = CollectingFeedback::new();
    let options = EngineOptions::builder()
        .call_failure(FailureMode::Empty)
        .build();
    let engine = FunctionEngine::new(&registry)
        .with_feedback(&feedback)
        .with_options(options);

    assert_eq!(engine.expand_calls("x $func:fail() y", &Context::new()), "x  y");
    assert_eq!(feedback.len(), 1);
}

#[test]
fn unbalanced_call_degrades_without_panicking() {
    assert_eq!(expand_ok("$func:echo(a, b"), "a");
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn one_engine_serves_many_threads() {
    let registry = registry();
    let feedback = CollectingFeedback::new();
    let engine = FunctionEngine::new(&registry).with_feedback(&feedback);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = &engine;
                scope.spawn(move || {
                    let ctx = context! { "i" => i };
                    engine.expand_calls("$func:echo($(i)).wrap() $func:fail()", &ctx)
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let output = handle.join().unwrap();
            assert_eq!(output, format!("[{i}] $func:fail()"));
        }
    });
    assert_eq!(feedback.len(), 8);
}
