//! Evaluation environment
//!
//! A stack of variable scopes. The renderer creates one `Env` per render call, binds the
//! callables and the context into the outermost scope, and opens a nested scope for every
//! loop body so the loop variable disappears once the loop is done.

use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Env {
    /// Innermost scope last
    scopes: Vec<HashMap<String, Value>>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Look a variable up, innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Bind a variable in the innermost scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Drop the innermost scope. The outermost scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Every visible variable name, sorted (for diagnostics).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .scopes
            .iter()
            .flat_map(|scope| scope.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_scope_shadows_and_unwinds() {
        let mut env = Env::new();
        env.set("x", Value::Int(1));
        env.push_scope();
        env.set("x", Value::Int(2));
        assert_eq!(env.get("x"), Some(&Value::Int(2)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_outermost_scope_survives_pop() {
        let mut env = Env::new();
        env.set("x", Value::Int(1));
        env.pop_scope();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_names() {
        let mut env = Env::new();
        env.set("b", Value::Null);
        env.push_scope();
        env.set("a", Value::Null);
        env.set("b", Value::Null);
        assert_eq!(env.names(), vec!["a".to_string(), "b".to_string()]);
    }
}
