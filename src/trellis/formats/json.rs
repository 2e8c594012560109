//! JSON formatter
//!
//! Nodes serialize as `{"type", "content"?, "children"}`.

use super::registry::{FormatError, Formatter};
use crate::trellis::ast::SyntaxNode;

pub fn to_json_str(root: &SyntaxNode) -> Result<String, FormatError> {
    serde_json::to_string_pretty(root).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &SyntaxNode) -> Result<String, FormatError> {
        to_json_str(node)
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON tree"
    }
}
