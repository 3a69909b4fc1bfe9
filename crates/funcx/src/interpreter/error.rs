//! Error types for funcx evaluation.

use strsim::levenshtein;
use thiserror::Error;

/// An error raised while evaluating a call against a registry.
///
/// The engine never propagates these out of an expansion: they are rendered
/// to the feedback sink and the failure policy decides what text replaces
/// the failed expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No base function is registered under this name.
    #[error("unknown function '{name}'{}", format_suggestions(suggestions))]
    UnknownFunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// No chained method (or base function) is registered under this name.
    #[error("unknown method '{name}' on '{receiver}'{}", format_suggestions(suggestions))]
    UnknownMethod {
        name: String,
        receiver: String,
        suggestions: Vec<String>,
    },

    /// Wrong number of arguments passed to a function.
    ///
    /// `max` is `usize::MAX` for functions without an upper bound.
    #[error("function '{name}' expects {}, got {got}", format_arity(*min, *max))]
    ArgumentCount {
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },

    /// An argument could not be interpreted.
    #[error("function '{name}' got invalid argument '{value}': {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    /// The call text held no function name at all.
    #[error("empty function call '{text}'")]
    EmptyCall { text: String },

    /// A registered function reported its own failure.
    #[error("function '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

fn format_arity(min: usize, max: usize) -> String {
    let noun = |n: usize| if n == 1 { "argument" } else { "arguments" };
    if max == usize::MAX {
        format!("at least {min} {}", noun(min))
    } else if min == max {
        format!("{min} {}", noun(min))
    } else {
        format!("{min} to {max} {}", noun(max))
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions for `name` from `available`.
///
/// Returns up to three candidates within edit distance 1 (names of three
/// characters or fewer) or 2, closest first. Exact matches are excluded.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.clone())
        .collect()
}
