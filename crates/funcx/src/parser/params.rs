//! Argument-list splitting and parenthesis matching.

use crate::parser::placeholder::resolve_placeholders;
use crate::types::Context;

/// Split the text between a call's parentheses into parameters.
///
/// A `,` separates parameters only at bracket depth 0 (`{}`/`[]` share one
/// counter), paren depth 0, and outside quotes. Inside `"` or `'` quotes every
/// character is literal until the same quote character recurs.
///
/// Each parameter is trimmed, loses one layer of surrounding matching quotes,
/// and has its `$(key)` placeholders resolved against `context`. Every `,`
/// separator emits a parameter, even an empty one; the trailing buffer is
/// emitted only when it holds something besides whitespace, so `()` yields no
/// parameters.
///
/// # Example
///
/// ```
/// use funcx::parser::parse_parameters;
///
/// let params = parse_parameters(r#""a,b", f(x, y), [1, 2]"#, &funcx::Context::new());
/// assert_eq!(params, vec!["a,b", "f(x, y)", "[1, 2]"]);
/// ```
pub fn parse_parameters(raw: &str, context: &Context) -> Vec<String> {
    let mut parameters = Vec::new();
    let mut current = String::new();
    let mut bracket_depth: usize = 0;
    let mut paren_depth: usize = 0;
    let mut quote: Option<char> = None;

    for c in raw.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '{' | '[' => {
                bracket_depth += 1;
                current.push(c);
            }
            '}' | ']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                current.push(c);
            }
            '(' => {
                paren_depth += 1;
                current.push(c);
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(c);
            }
            ',' if bracket_depth == 0 && paren_depth == 0 => {
                parameters.push(finish_parameter(&current, context));
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() {
        parameters.push(finish_parameter(&current, context));
    }
    parameters
}

/// Find the `)` matching the `(` at byte offset `open_pos`.
///
/// Nested parentheses are counted with no awareness of quotes. When the
/// parenthesis is never closed this returns the offset of the last character
/// of `text` instead of failing, so callers treat the rest of the string as
/// the argument list.
pub fn find_matching_paren(text: &str, open_pos: usize) -> usize {
    let mut depth: usize = 1;
    if let Some(rest) = text.get(open_pos + 1..) {
        for (offset, c) in rest.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return open_pos + 1 + offset;
                    }
                }
                _ => {}
            }
        }
    }
    last_char_offset(text)
}

/// Text strictly between `open` and `close`, or empty when they are adjacent
/// or out of order.
pub(crate) fn between(text: &str, open: usize, close: usize) -> &str {
    text.get(open + 1..close).unwrap_or("")
}

/// Offset just past the character starting at `pos`.
pub(crate) fn after(text: &str, pos: usize) -> usize {
    pos + text
        .get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

/// Strip one layer of matching `"` or `'` when they wrap the whole text.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn finish_parameter(raw: &str, context: &Context) -> String {
    resolve_placeholders(strip_quotes(raw.trim()), context)
}

fn last_char_offset(text: &str) -> usize {
    text.char_indices().next_back().map_or(0, |(i, _)| i)
}
