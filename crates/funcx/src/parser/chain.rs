//! Dotted method-chain parsing.
//!
//! A chain such as `upper("hi").trim()` becomes an ordered list of calls
//! where every call after the first operates on the previous result.

use funcx_semantics::has_namespace_prefix;

use crate::parser::ast::ParsedCall;
use crate::parser::params::{after, between, find_matching_paren, parse_parameters};
use crate::parser::tokenizer::parse_function_part;
use crate::types::Context;

/// Parse a dotted call chain into its steps, left to right.
///
/// At each position the nearer of the next `(` and the next `.` decides the
/// segment: a `(` at or before the `.` starts an argument list, otherwise the
/// text up to the `.` is a zero-argument name. Dots inside argument lists
/// never split the chain. Empty segments (as in `a..b` or a trailing `.`) are
/// skipped.
///
/// # Example
///
/// ```
/// use funcx::parser::parse_chained_call;
/// use funcx::ParsedCall;
///
/// let steps = parse_chained_call(r#"upper("hi").trim()"#, &funcx::Context::new());
/// assert_eq!(
///     steps,
///     vec![
///         ParsedCall::new("upper", vec!["hi".to_string()]),
///         ParsedCall::bare("trim"),
///     ]
/// );
/// ```
pub fn parse_chained_call(text: &str, context: &Context) -> Vec<ParsedCall> {
    let mut calls = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let dot = rest.find('.');
        let paren = rest.find('(');

        match (paren, dot) {
            (Some(p), d) if d.is_none_or(|d| p <= d) => {
                let open = pos + p;
                let close = find_matching_paren(text, open);
                push_call(
                    &mut calls,
                    &text[pos..open],
                    parse_parameters(between(text, open, close), context),
                );
                pos = after(text, close);
                if text[pos.min(text.len())..].starts_with('.') {
                    pos += 1;
                }
            }
            (_, Some(d)) => {
                push_call(&mut calls, &rest[..d], Vec::new());
                pos += d + 1;
            }
            _ => {
                push_call(&mut calls, rest, Vec::new());
                break;
            }
        }
    }
    calls
}

/// Parse a chain whose first call carries a namespace prefix.
///
/// In `string.upper("hi").trim()` the first `.` belongs to the name, so the
/// first call spans through the `)` matching the first `(` after that dot.
/// A remainder starting with `.` is parsed with [`parse_chained_call`].
///
/// Without any `(` after the prefix, the first call is the text up to the
/// second `.` and the rest is chained.
pub fn parse_prefixed_chained_call(text: &str, context: &Context) -> Vec<ParsedCall> {
    let text = text.trim();
    let Some(first_dot) = text.find('.') else {
        return parse_chained_call(text, context);
    };
    let name_end = first_dot + 1;

    let (first, rest) = match text[name_end..].find('(') {
        Some(p) => {
            let open = name_end + p;
            let close = find_matching_paren(text, open);
            let first = ParsedCall::new(
                text[..open].trim(),
                parse_parameters(between(text, open, close), context),
            );
            (first, text.get(after(text, close)..).unwrap_or(""))
        }
        None => match text[name_end..].find('.') {
            Some(d) => (
                ParsedCall::bare(text[..name_end + d].trim()),
                &text[name_end + d..],
            ),
            None => (ParsedCall::bare(text), ""),
        },
    };

    let mut calls = vec![first];
    if let Some(chained) = rest.strip_prefix('.') {
        calls.extend(parse_chained_call(chained, context));
    }
    calls
}

/// Split the text after `$func:` into the calls to run, left to right.
///
/// - no `.`: a single call
/// - namespaced (`string.`, `hash.`, ...) with one `.`: a single call
/// - namespaced with more than one `.`: [`parse_prefixed_chained_call`]
/// - any other dotted text: [`parse_chained_call`]
///
/// The result is empty only when the text names no function at all.
pub fn parse_call_text(text: &str, context: &Context) -> Vec<ParsedCall> {
    let text = text.trim();
    if !text.contains('.') {
        return vec![parse_function_part(text, context)];
    }
    if !has_namespace_prefix(text) {
        return parse_chained_call(text, context);
    }
    if text.matches('.').count() > 1 {
        parse_prefixed_chained_call(text, context)
    } else {
        vec![parse_function_part(text, context)]
    }
}

fn push_call(calls: &mut Vec<ParsedCall>, name: &str, parameters: Vec<String>) {
    let name = name.trim();
    if !name.is_empty() {
        calls.push(ParsedCall::new(name, parameters));
    }
}
