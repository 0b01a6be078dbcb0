//! Binding host values into an evaluation environment
//!
//! A render context is either keyed (a map) or a fixed-field aggregate (a struct). Both are
//! reduced to a list of `(name, value)` pairs by [`Bindable`], so the renderer never inspects
//! the context's shape itself.
//!
//! Struct-like contexts go through serde: wrap them in [`Record`] and their field names become
//! top-level variables.

use crate::env::Env;
use crate::error::EvalError;
use crate::value::Value;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

pub trait Bindable {
    /// The top-level variables this value provides.
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError>;

    /// Bind every variable into the innermost scope of `env`.
    fn bind_into(&self, env: &mut Env) -> Result<(), EvalError> {
        for (name, value) in self.bindings()? {
            env.set(name, value);
        }
        Ok(())
    }
}

/// No context at all.
impl Bindable for () {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        Ok(Vec::new())
    }
}

impl<T: Bindable + ?Sized> Bindable for &T {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        (**self).bindings()
    }
}

impl<K, V, S> Bindable for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Clone + Into<Value>,
    S: BuildHasher,
{
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
            .collect())
    }
}

impl<K, V> Bindable for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<Value>,
{
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
            .collect())
    }
}

impl Bindable for serde_json::Map<String, serde_json::Value> {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect())
    }
}

/// JSON objects bind their members; `null` binds nothing; anything else is rejected.
impl Bindable for serde_json::Value {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        match self {
            serde_json::Value::Object(map) => map.bindings(),
            serde_json::Value::Null => Ok(Vec::new()),
            other => Err(EvalError::NotBindable(json_type_name(other))),
        }
    }
}

/// A mapping value binds its entries.
impl Bindable for Value {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        match self {
            Value::Map(map) => map.bindings(),
            Value::Null => Ok(Vec::new()),
            other => Err(EvalError::NotBindable(other.type_name())),
        }
    }
}

/// A struct-like context whose fields become variables.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Page { title: String }
///
/// template.execute(&mut out, &Record(&Page { title: "Hi".into() }))?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Record<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Bindable for Record<'_, T> {
    fn bindings(&self) -> Result<Vec<(String, Value)>, EvalError> {
        match Value::from_serialize(self.0)? {
            Value::Map(fields) => fields.bindings(),
            other => Err(EvalError::NotBindable(other.type_name())),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "nil",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "map",
    }
}
