//! Call and pipeline boundary detection.

use crate::parser::ast::{ParsedCall, PipelineSplit, PipelineStep};
use crate::parser::params::{between, find_matching_paren, parse_parameters, strip_quotes};
use crate::parser::placeholder::{is_placeholder_pattern, resolve_placeholders};
use crate::types::Context;

/// Find where a plain `$func:` call that starts at `start_pos` ends.
///
/// The call ends at the first whitespace or `$` at paren depth 0, or at the
/// end of the text. The returned offset is exclusive.
pub fn find_function_end(text: &str, start_pos: usize) -> usize {
    let Some(rest) = text.get(start_pos..) else {
        return text.len();
    };
    let mut paren_depth: usize = 0;
    for (offset, c) in rest.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            c if paren_depth == 0 && (c.is_whitespace() || c == '$') => {
                return start_pos + offset;
            }
            _ => {}
        }
    }
    text.len()
}

/// Find the closing `}}` of a pipeline whose body starts at `start_pos`.
///
/// Braces inside the body are balanced (so inline JSON works) and quoted text
/// is skipped. Returns the offset of the first `}` of the terminator, or
/// `None` when the pipeline is never closed.
pub fn find_pipeline_end(text: &str, start_pos: usize) -> Option<usize> {
    let rest = text.get(start_pos..)?;
    let mut brace_depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut chars = rest.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => brace_depth += 1,
            '}' => {
                if brace_depth == 0 && matches!(chars.peek(), Some((_, '}'))) {
                    return Some(start_pos + offset);
                }
                brace_depth = brace_depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    None
}

/// Split a pipeline body on `|` into trimmed, non-empty steps.
///
/// With [`PipelineSplit::ParensOnly`] only parentheses and quotes protect a
/// `|`; [`PipelineSplit::ParensAndBrackets`] also honors `[]` and `{}`.
pub fn split_pipeline_steps(text: &str, split: PipelineSplit) -> Vec<String> {
    let mut steps = Vec::new();
    let mut current = String::new();
    let mut paren_depth: usize = 0;
    let mut bracket_depth: usize = 0;
    let mut quote: Option<char> = None;
    let brackets = split == PipelineSplit::ParensAndBrackets;

    for c in text.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '[' | '{' if brackets => bracket_depth += 1,
            ']' | '}' if brackets => bracket_depth = bracket_depth.saturating_sub(1),
            '|' if paren_depth == 0 && bracket_depth == 0 => {
                push_step(&mut steps, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    push_step(&mut steps, &current);
    steps
}

/// Parse `name(args)` or a bare `name` into a [`ParsedCall`].
///
/// Only the first `(` matters; anything after its matching `)` is ignored.
pub fn parse_function_part(text: &str, context: &Context) -> ParsedCall {
    let text = text.trim();
    match text.find('(') {
        Some(open) => {
            let close = find_matching_paren(text, open);
            ParsedCall::new(
                text[..open].trim(),
                parse_parameters(between(text, open, close), context),
            )
        }
        None => ParsedCall::bare(text),
    }
}

/// Whether `name` is a reserved base function or lives in a reserved
/// namespace.
///
/// Only used to decide whether a pipeline's first step is a call or a literal.
pub fn is_known_base_function(name: &str) -> bool {
    funcx_semantics::is_known_base_function(name.trim())
}

/// Split and classify a pipeline body.
///
/// The first step becomes a [`PipelineStep::Literal`] when it has no `(` and
/// is not a known base function name. A quoted literal loses its quotes unless
/// it contains a `$(key)` token; placeholders are then resolved. Every other
/// step is a [`PipelineStep::Call`].
pub fn parse_pipeline(body: &str, context: &Context, split: PipelineSplit) -> Vec<PipelineStep> {
    split_pipeline_steps(body, split)
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i == 0 && !step.contains('(') && !is_known_base_function(step) {
                PipelineStep::Literal {
                    value: literal_value(step, context),
                }
            } else {
                PipelineStep::Call(parse_function_part(step, context))
            }
        })
        .collect()
}

fn literal_value(step: &str, context: &Context) -> String {
    let unquoted = if is_placeholder_pattern(step) {
        step
    } else {
        strip_quotes(step)
    };
    resolve_placeholders(unquoted, context)
}

fn push_step(steps: &mut Vec<String>, raw: &str) {
    let step = raw.trim();
    if !step.is_empty() {
        steps.push(step.to_string());
    }
}
