mod value;

use std::collections::HashMap;

pub use value::Value;

/// Caller-supplied key to value lookup used for `$(key)` placeholders.
///
/// Keys are case-sensitive and never normalized.
pub type Context = HashMap<String, String>;
