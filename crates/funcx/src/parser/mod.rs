//! Character-level scanners for `$func:` expressions.
//!
//! Everything here is infallible: unbalanced delimiters degrade to
//! documented fallbacks rather than errors, so a malformed expression
//! never aborts the surrounding expansion.

pub mod ast;
mod chain;
mod params;
mod placeholder;
mod tokenizer;

pub use ast::*;
pub use chain::{parse_call_text, parse_chained_call, parse_prefixed_chained_call};
pub use params::{find_matching_paren, parse_parameters};
pub use placeholder::{is_placeholder_pattern, resolve_placeholders};
pub use tokenizer::{
    find_function_end, find_pipeline_end, is_known_base_function, parse_function_part,
    parse_pipeline, split_pipeline_steps,
};
