//! Rendering context

use std::collections::BTreeMap;

/// State threaded through one rendering walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext<O> {
    /// Nesting of the node being rendered, 0 for the root
    pub depth: usize,
    /// Named values callbacks can read and write
    pub variables: BTreeMap<String, String>,
    pub output: O,
    pub(crate) ancestors: Vec<String>,
}

impl<O> RenderContext<O> {
    pub fn new(output: O) -> Self {
        Self {
            depth: 0,
            variables: BTreeMap::new(),
            output,
            ancestors: Vec::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Types of the nodes enclosing the current one, outermost first
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn parent_kind(&self) -> Option<&str> {
        self.ancestors.last().map(String::as_str)
    }

    pub fn into_output(self) -> O {
        self.output
    }
}

impl RenderContext<String> {
    /// `depth` spaces when `indent` is set
    pub fn indentation(&self, indent: bool) -> String {
        if indent {
            " ".repeat(self.depth)
        } else {
            String::new()
        }
    }
}
