//! Error types for fixture construction.

use pax_core::GraphError;
use pax_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to build the ontology: {0}")]
    Registry(#[from] RegistryError),

    #[error("Failed to build the graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Unknown type '{0}'")]
    UnknownType(String),

    #[error("Unknown node '{0}'")]
    UnknownNode(String),
}

impl FixtureError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    pub fn unknown_node(uri: impl Into<String>) -> Self {
        Self::UnknownNode(uri.into())
    }
}

pub type FixtureResult<T> = Result<T, FixtureError>;
