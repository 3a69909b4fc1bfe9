//! `$(key)` placeholder scanning using winnow.
//!
//! Splits text into literal runs and placeholders. The first `)` after `$(`
//! closes the key, so keys cannot contain parentheses. Substituted values are
//! emitted as-is and never scanned again.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_till;

use crate::types::Context;

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'i> {
    /// Literal text copied through unchanged.
    Text(&'i str),
    /// A `$(key)` token; `raw` is the full token including delimiters.
    Placeholder { raw: &'i str, key: &'i str },
}

/// Replace every `$(key)` whose key is present in `context`.
///
/// Tokens with an empty key or a key missing from the context are left
/// untouched. Substitution is a single pass: a value that itself contains
/// `$(...)` text is not expanded again.
pub fn resolve_placeholders(text: &str, context: &Context) -> String {
    if !text.contains("$(") {
        return text.to_string();
    }
    let Some(pieces) = scan(text) else {
        return text.to_string();
    };

    let mut output = String::with_capacity(text.len());
    for piece in pieces {
        match piece {
            Piece::Text(s) => output.push_str(s),
            Piece::Placeholder { raw, key } => match context.get(key) {
                Some(value) if !key.is_empty() => output.push_str(value),
                _ => output.push_str(raw),
            },
        }
    }
    output
}

/// Whether `text` contains at least one `$(key)` token.
pub fn is_placeholder_pattern(text: &str) -> bool {
    scan(text).is_some_and(|pieces| {
        pieces
            .iter()
            .any(|piece| matches!(piece, Piece::Placeholder { .. }))
    })
}

fn scan(text: &str) -> Option<Vec<Piece<'_>>> {
    let mut remaining = text;
    let pieces = pieces(&mut remaining).ok()?;
    remaining.is_empty().then_some(pieces)
}

/// Parse the whole input into pieces.
fn pieces<'i>(input: &mut &'i str) -> ModalResult<Vec<Piece<'i>>> {
    repeat(0.., alt((placeholder, literal))).parse_next(input)
}

/// Parse `$(` key `)`.
fn placeholder<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    delimited("$(", take_till(0.., ')'), ')')
        .with_taken()
        .map(|(key, raw)| Piece::Placeholder { raw, key })
        .parse_next(input)
}

/// Parse a run of text up to the next `$`, or a lone `$` that does not
/// start a placeholder.
fn literal<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((take_till(1.., '$'), "$"))
        .map(Piece::Text)
        .parse_next(input)
}
