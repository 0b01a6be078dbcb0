//! Output formats for parsed trees
//!
//!     These are debugging views of a [`Document`], used by `slim inspect` and by snapshot
//!     tests. Rendering to HTML is not a format here; it lives in the `slim-html` crate.

pub mod json;
pub mod treeviz;

use crate::slim::ast::Document;
use std::collections::HashMap;
use thiserror::Error;

pub use json::JsonFormatter;
pub use treeviz::{to_treeviz_str, TreevizFormatter};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format '{0}'")]
    FormatNotFound(String),
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Serializes a parsed tree to text.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;
}

/// Formatters by name.
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a formatter, replacing one with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Available names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(doc)
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TreevizFormatter);
        registry.register(JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slim::parsing::parse_str;

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["json", "treeviz"]);
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::default();
        let doc = parse_str("p");
        assert!(matches!(
            registry.serialize(&doc, "yaml"),
            Err(FormatError::FormatNotFound(name)) if name == "yaml"
        ));
    }
}
