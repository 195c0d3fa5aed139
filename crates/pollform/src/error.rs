//! Error types for pollform.

use std::path::PathBuf;

/// Result type alias for pollform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building documents or driving option lists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No element with the given `id` attribute is attached to the document.
    #[error("No element with id '{id}' in the document")]
    ElementNotFound { id: String },

    /// The node handle does not refer to a live node of this document.
    #[error("Invalid or removed node handle")]
    InvalidNode,

    /// The target node cannot hold children (text nodes).
    #[error("Node <{tag}> cannot have children")]
    NotAContainer { tag: String },

    /// A tag or attribute name that cannot be serialized.
    #[error("Invalid tag or attribute name '{name}'")]
    InvalidName { name: String },

    /// The reference node is not a direct child of the given parent.
    #[error("Reference node is not a child of the target parent")]
    NotAChild,

    /// Inserting the node would make it an ancestor of itself.
    #[error("Inserting the node would create a cycle in the tree")]
    HierarchyCycle,

    /// The operation needs an element but got a text or document node.
    #[error("Expected an element node")]
    NotAnElement,

    /// The page a controller was created for has been dropped.
    #[error("The page has been dropped")]
    PageClosed,

    /// Configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file I/O failure.
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range or empty.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },
}

impl Error {
    /// Create an element-not-found error.
    pub fn element_not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }

    /// Create a configuration I/O error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration validation error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
