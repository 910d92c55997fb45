//! Entity structures for PAX.
//!
//! Nodes are typed elements of the object graph; links are the directed
//! property values that connect them.

use crate::{Attributes, NodeId, PropertyId, TypeId, Value};

/// A node in the object graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Runtime class of this node (reference to registry).
    pub type_id: TypeId,
    /// Stable external identifier (RDF id / URI).
    pub uri: String,
    /// Attribute values.
    pub attributes: Attributes,
}

impl Node {
    /// Create a new node with the given properties.
    pub fn new(id: NodeId, type_id: TypeId, uri: impl Into<String>) -> Self {
        Self {
            id,
            type_id,
            uri: uri.into(),
            attributes: Attributes::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }
}

/// A directed property value: `source --property--> target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: NodeId,
    pub property: PropertyId,
    pub target: NodeId,
}

impl Link {
    pub fn new(source: NodeId, property: PropertyId, target: NodeId) -> Self {
        Self {
            source,
            property,
            target,
        }
    }
}
