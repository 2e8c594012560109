//! Format registry for syntax tree serialization
//!
//! Each format implements [Formatter] and is looked up by name in a [FormatRegistry].

use crate::trellis::ast::SyntaxNode;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, node: &SyntaxNode) -> Result<String, FormatError>;

    /// One-line summary shown in format listings
    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, node: &SyntaxNode, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(node)
    }

    /// Available format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn with_defaults() -> Self {
        Self::with_truncation(super::treeviz::DEFAULT_TRUNCATE)
    }

    /// Built-in formatters, treeviz truncating leaf content to `truncate` characters
    pub fn with_truncation(truncate: usize) -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter::new(truncate));
        registry.register(super::JsonFormatter);
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

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _node: &SyntaxNode) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        registry.register(TestFormatter);

        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(
            registry.serialize(&SyntaxNode::rule(0, "s"), "test").unwrap(),
            "test output"
        );
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        let result = registry.serialize(&SyntaxNode::rule(0, "s"), "nonexistent");
        assert_eq!(
            result.unwrap_err(),
            FormatError::FormatNotFound("nonexistent".to_string())
        );
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["json", "treeviz"]);
    }

    #[test]
    fn test_default_formatters_are_described() {
        let registry = FormatRegistry::default();
        for name in registry.list_formats() {
            let formatter = registry.get(&name).unwrap();
            assert!(!formatter.description().is_empty(), "{name} has no description");
        }
        assert_eq!(registry.get("test").map(|f| f.description()), None);
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::FormatNotFound("test".to_string());
        assert_eq!(format!("{err}"), "Format 'test' not found");
    }
}
