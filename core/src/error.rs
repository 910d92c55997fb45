//! Common error types for PAX.

use crate::{NodeId, PropertyId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node with the given URI already exists.
    #[error("Duplicate URI '{0}'")]
    DuplicateUri(String),

    /// Property not found.
    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    /// No property, forward or inverse, carries the given name.
    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    /// A link endpoint is not an instance of the property's domain or range.
    #[error("Type mismatch on '{property}': expected {expected}, got {actual}")]
    TypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
