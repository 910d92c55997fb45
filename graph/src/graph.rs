//! Core graph storage implementation.

use crate::index::{AdjacencyIndex, TypeIndex};
use pax_core::{GraphError, GraphResult, Link, Node, NodeId, PropertyId, TypeId, Value};
use pax_registry::Registry;
use std::collections::HashMap;

/// ID allocator for nodes.
#[derive(Debug)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

/// The in-memory object graph.
#[derive(Debug)]
pub struct Graph {
    /// Node storage
    nodes: HashMap<NodeId, Node>,
    /// URI lookup
    uris: HashMap<String, NodeId>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Type index
    type_index: TypeIndex,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    /// Number of distinct links
    link_count: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            uris: HashMap::new(),
            id_alloc: IdAllocator::new(),
            type_index: TypeIndex::new(),
            adj_index: AdjacencyIndex::new(),
            link_count: 0,
        }
    }

    // ==================== Node Operations ====================

    /// Create a new node of the given class under a unique URI.
    pub fn add_node(&mut self, type_id: TypeId, uri: impl Into<String>) -> GraphResult<NodeId> {
        let uri = uri.into();
        if self.uris.contains_key(&uri) {
            return Err(GraphError::DuplicateUri(uri));
        }

        let id = self.id_alloc.alloc_node_id();
        self.type_index.insert(type_id, id);
        self.uris.insert(uri.clone(), id);
        self.nodes.insert(id, Node::new(id, type_id, uri));
        Ok(id)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Resolve a URI to its node.
    pub fn node_by_uri(&self, uri: &str) -> Option<NodeId> {
        self.uris.get(uri).copied()
    }

    /// Set an attribute on a node.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        node.set_attr(name, value);
        Ok(())
    }

    // ==================== Link Operations ====================

    /// Link two nodes through a named property, validating both endpoints.
    ///
    /// An inverse name links in the opposite direction, so
    /// `link(r, m, "componentOf", c)` stores `c --component--> m`.
    /// Returns `false` if the link already existed.
    pub fn link(
        &mut self,
        registry: &Registry,
        source: NodeId,
        property: &str,
        target: NodeId,
    ) -> GraphResult<bool> {
        let prop = registry
            .resolve_property(property)
            .ok_or_else(|| GraphError::UnknownProperty(property.to_string()))?;
        let def = registry
            .get_property(prop.id)
            .ok_or(GraphError::PropertyNotFound(prop.id))?;
        let (source, target) = if prop.inverse {
            (target, source)
        } else {
            (source, target)
        };

        for (node, expected) in [(source, def.domain), (target, def.range)] {
            let actual = self.type_of(node)?;
            if !registry.is_subtype(actual, expected) {
                return Err(GraphError::TypeMismatch {
                    property: def.name.clone(),
                    expected: registry.type_name(expected).to_string(),
                    actual: registry.type_name(actual).to_string(),
                });
            }
        }

        let added = self.adj_index.insert(source, def.id, target);
        if added {
            self.link_count += 1;
        }
        Ok(added)
    }

    // ==================== Query Operations ====================

    /// Runtime class of a node.
    pub fn type_of(&self, id: NodeId) -> GraphResult<TypeId> {
        self.nodes
            .get(&id)
            .map(|n| n.type_id)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Nodes whose runtime class is exactly `type_id`, in ID order.
    pub fn nodes_of_type(&self, type_id: TypeId) -> impl Iterator<Item = NodeId> + '_ {
        self.type_index.get(type_id)
    }

    /// Values of `property` on `node`.
    pub fn targets(&self, node: NodeId, property: PropertyId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj_index.targets(node, property)
    }

    /// Nodes holding `node` as a value of `property`.
    pub fn sources(&self, node: NodeId, property: PropertyId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj_index.sources(node, property)
    }

    /// Iterate over all node IDs.
    pub fn all_node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterate over all links.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.adj_index
            .iter()
            .map(|(source, property, target)| Link::new(source, property, target))
    }

    // ==================== Statistics ====================

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of links.
    pub fn link_count(&self) -> usize {
        self.link_count
    }
}
