//! JSON dump of the node tree

use super::{FormatError, Formatter};
use crate::slim::ast::Document;

pub fn to_json_str(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&doc.root)
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Node tree as pretty-printed JSON"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_str(doc)
    }
}
