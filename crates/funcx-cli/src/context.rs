//! Building the expansion [`Context`] from command-line input.

use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

use funcx::Context;
use miette::Diagnostic;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Errors from loading a `--context` file.
#[derive(Debug, Error, Diagnostic)]
pub enum ContextError {
    #[error("cannot read context file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in context file {}", path.display())]
    Json {
        path: PathBuf,
        content: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("context file {} must contain a JSON object, found {found}", path.display())]
    #[diagnostic(code(funcx::context))]
    NotAnObject { path: PathBuf, found: &'static str },
}

/// Parse a `key=value` parameter string.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected key=value"))?;
    if key.is_empty() {
        return Err(format!("invalid parameter format '{s}': key is empty"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read a flat JSON object into a context map.
///
/// Strings are taken as-is, `null` becomes an empty string, and every other
/// value is stored as its JSON text.
pub fn load_context(path: &Path) -> Result<Context, ContextError> {
    let content = read_to_string(path).map_err(|source| ContextError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json: JsonValue = match serde_json::from_str(&content) {
        Ok(json) => json,
        Err(source) => {
            return Err(ContextError::Json {
                path: path.to_path_buf(),
                content,
                source,
            });
        }
    };
    match json {
        JsonValue::Object(map) => Ok(flatten(map)),
        other => Err(ContextError::NotAnObject {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Merge a context file and `-p` pairs; later pairs win.
pub fn build_context(
    file: Option<&Path>,
    params: &[(String, String)],
) -> Result<Context, ContextError> {
    let mut context = match file {
        Some(path) => load_context(path)?,
        None => Context::new(),
    };
    context.extend(params.iter().cloned());
    Ok(context)
}

fn flatten(map: Map<String, JsonValue>) -> Context {
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                JsonValue::String(s) => s,
                JsonValue::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
