//! Rendering errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A callback gave up on a node
    #[error("failed to render '{node}': {message}")]
    Callback { node: String, message: String },

    #[error("context variable '{name}' is not set")]
    MissingVariable { name: String },
}

impl RenderError {
    pub fn callback(node: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Callback {
            node: node.into(),
            message: message.into(),
        }
    }
}
