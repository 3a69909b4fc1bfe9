//! The standard `string.*` function family.
//!
//! Each function is registered twice: as a `string.<name>` base function whose
//! first parameter is the subject, and as a bare `<name>` chained method whose
//! subject is the receiver. Lengths and offsets count grapheme clusters.
//!
//! Other reserved families (`hash.`, `url.`, `web.`, `json.`, ...) involve
//! I/O or platform state and are supplied by embedders.

use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::error::EvalError;
use crate::interpreter::registry::MapRegistry;
use crate::types::Value;

type Apply = fn(&str, &[String]) -> Result<Value, String>;
type ApplyList = fn(&[Value], &[String]) -> Result<Value, String>;

/// A string function: `subject.name(args)`.
struct StringFunction {
    name: &'static str,
    /// Allowed number of arguments after the subject.
    min_args: usize,
    max_args: usize,
    apply: Apply,
    /// Behavior for a list receiver; `None` applies to the list's text.
    on_list: Option<ApplyList>,
}

impl StringFunction {
    fn accepts(&self, args: usize) -> bool {
        (self.min_args..=self.max_args).contains(&args)
    }

    /// `subject` counts the leading subject parameter of the base form.
    fn arity_error(&self, qualified: &str, got: usize, subject: usize) -> EvalError {
        EvalError::ArgumentCount {
            name: qualified.to_string(),
            min: self.min_args + subject,
            max: self.max_args.saturating_add(subject),
            got,
        }
    }

    fn failed(qualified: &str, message: String) -> EvalError {
        EvalError::Failed {
            name: qualified.to_string(),
            message,
        }
    }

    fn call(&self, qualified: &str, subject: &str, args: &[String]) -> Result<Value, EvalError> {
        (self.apply)(subject, args).map_err(|message| Self::failed(qualified, message))
    }

    /// Apply to the previous step's value without a round trip through text
    /// when the receiver is already a string or a list.
    fn call_on(&self, receiver: &Value, args: &[String]) -> Result<Value, EvalError> {
        if let (Some(items), Some(on_list)) = (receiver.as_list(), self.on_list) {
            return on_list(items, args).map_err(|message| Self::failed(self.name, message));
        }
        match receiver.as_string() {
            Some(text) => self.call(self.name, text, args),
            None => self.call(self.name, &receiver.to_string(), args),
        }
    }
}

/// Create a registry holding only the string family.
pub fn string_functions() -> MapRegistry {
    let mut registry = MapRegistry::new();
    register_string_functions(&mut registry);
    registry
}

/// Add the string family to an existing registry.
///
/// The chained forms of `length`, `reverse` and `contains` treat a list
/// receiver as a sequence of items rather than as its comma-joined text.
pub fn register_string_functions(registry: &mut MapRegistry) {
    for function in STRING_FUNCTIONS {
        let qualified = format!("string.{}", function.name);
        let base_name = qualified.clone();
        registry.register(&qualified, move |params| match params.split_first() {
            Some((subject, args)) if function.accepts(args.len()) => {
                function.call(&base_name, subject, args)
            }
            _ => Err(function.arity_error(&base_name, params.len(), 1)),
        });
        registry.register_method(function.name, move |receiver, args| {
            if function.accepts(args.len()) {
                function.call_on(&receiver, args)
            } else {
                Err(function.arity_error(function.name, args.len(), 0))
            }
        });
    }
}

/// Names of the string functions, without the `string.` prefix.
pub fn string_function_names() -> Vec<&'static str> {
    STRING_FUNCTIONS.iter().map(|f| f.name).collect()
}

const STRING_FUNCTIONS: &[StringFunction] = &[
    StringFunction {
        name: "upper",
        min_args: 0,
        max_args: 0,
        apply: |s, _| Ok(Value::String(s.to_uppercase())),
        on_list: None,
    },
    StringFunction {
        name: "lower",
        min_args: 0,
        max_args: 0,
        apply: |s, _| Ok(Value::String(s.to_lowercase())),
        on_list: None,
    },
    StringFunction {
        name: "trim",
        min_args: 0,
        max_args: 0,
        apply: |s, _| Ok(Value::from(s.trim())),
        on_list: None,
    },
    StringFunction {
        name: "length",
        min_args: 0,
        max_args: 0,
        apply: |s, _| Ok(Value::from(s.graphemes(true).count())),
        on_list: Some(|items, _| Ok(Value::from(items.len()))),
    },
    StringFunction {
        name: "substring",
        min_args: 1,
        max_args: 2,
        apply: substring,
        on_list: None,
    },
    StringFunction {
        name: "replace",
        min_args: 2,
        max_args: 2,
        apply: |s, args| Ok(Value::String(s.replace(args[0].as_str(), &args[1]))),
        on_list: None,
    },
    StringFunction {
        name: "reverse",
        min_args: 0,
        max_args: 0,
        apply: |s, _| Ok(Value::String(s.graphemes(true).rev().collect())),
        on_list: Some(|items, _| Ok(Value::List(items.iter().rev().cloned().collect()))),
    },
    StringFunction {
        name: "concat",
        min_args: 0,
        max_args: usize::MAX,
        apply: |s, args| {
            let mut out = s.to_string();
            for arg in args {
                out.push_str(arg);
            }
            Ok(Value::String(out))
        },
        on_list: None,
    },
    StringFunction {
        name: "contains",
        min_args: 1,
        max_args: 1,
        apply: |s, args| Ok(Value::Bool(s.contains(args[0].as_str()))),
        on_list: Some(|items, args| {
            Ok(Value::Bool(items.iter().any(|item| match item.as_string() {
                Some(text) => text == args[0],
                None => item.to_string() == args[0],
            })))
        }),
    },
    StringFunction {
        name: "startswith",
        min_args: 1,
        max_args: 1,
        apply: |s, args| Ok(Value::Bool(s.starts_with(args[0].as_str()))),
        on_list: None,
    },
    StringFunction {
        name: "endswith",
        min_args: 1,
        max_args: 1,
        apply: |s, args| Ok(Value::Bool(s.ends_with(args[0].as_str()))),
        on_list: None,
    },
    StringFunction {
        name: "padleft",
        min_args: 1,
        max_args: 2,
        apply: |s, args| pad(s, args, true),
        on_list: None,
    },
    StringFunction {
        name: "padright",
        min_args: 1,
        max_args: 2,
        apply: |s, args| pad(s, args, false),
        on_list: None,
    },
    StringFunction {
        name: "repeat",
        min_args: 1,
        max_args: 1,
        apply: |s, args| Ok(Value::String(s.repeat(parse_count(&args[0])?))),
        on_list: None,
    },
];

/// `substring(start)` or `substring(start, length)`, clamped to the subject.
fn substring(s: &str, args: &[String]) -> Result<Value, String> {
    let start = parse_count(&args[0])?;
    let length = args.get(1).map(|arg| parse_count(arg)).transpose()?;
    let graphemes = s.graphemes(true).skip(start);
    let out: String = match length {
        Some(length) => graphemes.take(length).collect(),
        None => graphemes.collect(),
    };
    Ok(Value::String(out))
}

fn pad(s: &str, args: &[String], left: bool) -> Result<Value, String> {
    let width = parse_count(&args[0])?;
    let fill = match args.get(1).map(String::as_str) {
        None | Some("") => " ",
        Some(fill) => fill
            .graphemes(true)
            .next()
            .ok_or_else(|| format!("invalid pad character '{fill}'"))?,
    };
    let missing = width.saturating_sub(s.graphemes(true).count());
    let padding = fill.repeat(missing);
    Ok(Value::String(if left {
        padding + s
    } else {
        format!("{s}{padding}")
    }))
}

fn parse_count(arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse::<usize>()
        .map_err(|_| format!("expected a non-negative integer, got '{arg}'"))
}
