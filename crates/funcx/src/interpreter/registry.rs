//! Function registry for dispatching calls by name.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::interpreter::error::{EvalError, compute_suggestions};
use crate::types::Value;

/// Base function signature: receives the call's parameters.
pub type BaseFn = Box<dyn Fn(&[String]) -> Result<Value, EvalError> + Send + Sync>;

/// Chained method signature: receives the previous result and the parameters.
pub type MethodFn = Box<dyn Fn(Value, &[String]) -> Result<Value, EvalError> + Send + Sync>;

/// The functions a [`FunctionEngine`](crate::FunctionEngine) dispatches to.
///
/// Implementations must be shareable across threads; the engine itself holds
/// no mutable state and may expand many strings concurrently.
pub trait FunctionRegistry: Send + Sync {
    /// Evaluate a base call such as `guid()` or `string.upper("x")`.
    fn evaluate_base(&self, name: &str, parameters: &[String]) -> Result<Value, EvalError>;

    /// Apply `method` to `receiver`, the result of the previous step.
    fn evaluate_chained(
        &self,
        receiver: Value,
        method: &str,
        parameters: &[String],
    ) -> Result<Value, EvalError>;
}

/// A [`FunctionRegistry`] backed by name to closure maps.
///
/// Names are matched ASCII case-insensitively. A chained call first looks for
/// a registered method; failing that, a base function with the same name is
/// invoked with the receiver's text prepended as its first parameter. This
/// lets `"abc" | string.upper()` reuse the `string.upper` base function.
///
/// # Example
///
/// ```
/// use funcx::{FunctionRegistry, MapRegistry, Value};
///
/// let mut registry = MapRegistry::new();
/// registry.register("greet", |params| Ok(Value::from(format!("hi {}", params[0]))));
/// registry.register_method("shout", |receiver, _| Ok(Value::from(receiver.to_string().to_uppercase())));
///
/// let base = registry.evaluate_base("Greet", &["bob".to_string()]).unwrap();
/// let chained = registry.evaluate_chained(base, "shout", &[]).unwrap();
/// assert_eq!(chained.to_string(), "HI BOB");
/// ```
#[derive(Default)]
pub struct MapRegistry {
    base: BTreeMap<String, BaseFn>,
    methods: BTreeMap<String, MethodFn>,
}

impl MapRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base function, replacing any previous one with that name.
    pub fn register<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&[String]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.base.insert(normalize(name), Box::new(f));
        self
    }

    /// Register a chained method, replacing any previous one with that name.
    pub fn register_method<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(Value, &[String]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.methods.insert(normalize(name), Box::new(f));
        self
    }

    /// Check if a base function exists.
    pub fn has_function(&self, name: &str) -> bool {
        self.base.contains_key(&normalize(name))
    }

    /// Check if a chained method exists.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(&normalize(name))
    }

    /// Registered base function names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.base.keys().cloned().collect()
    }

    /// Registered chained method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }
}

impl FunctionRegistry for MapRegistry {
    fn evaluate_base(&self, name: &str, parameters: &[String]) -> Result<Value, EvalError> {
        match self.base.get(&normalize(name)) {
            Some(f) => f(parameters),
            None => Err(EvalError::UnknownFunction {
                name: name.to_string(),
                suggestions: compute_suggestions(&normalize(name), &self.names()),
            }),
        }
    }

    fn evaluate_chained(
        &self,
        receiver: Value,
        method: &str,
        parameters: &[String],
    ) -> Result<Value, EvalError> {
        let key = normalize(method);
        if let Some(f) = self.methods.get(&key) {
            return f(receiver, parameters);
        }
        if let Some(f) = self.base.get(&key) {
            let mut args = Vec::with_capacity(parameters.len() + 1);
            args.push(receiver.into_text());
            args.extend_from_slice(parameters);
            return f(&args);
        }

        let mut available = self.method_names();
        available.extend(self.names());
        available.sort();
        available.dedup();
        Err(EvalError::UnknownMethod {
            name: method.to_string(),
            receiver: receiver.to_string(),
            suggestions: compute_suggestions(&key, &available),
        })
    }
}

impl Debug for MapRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MapRegistry")
            .field("base", &self.base.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
