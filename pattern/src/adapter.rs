//! Read-only access to the object graph.

use pax_core::{NodeId, TypeId, Value};
use pax_graph::Graph;
use pax_registry::{PropertyRef, Registry};
use std::collections::BTreeSet;

/// What the search engine needs from a graph.
///
/// Implementations must be free of side effects and safe to share across
/// threads: one adapter serves every seed of a parallel search.
pub trait GraphAccess: Sync {
    /// The schema the graph is typed against.
    fn registry(&self) -> &Registry;

    /// Runtime class of a node, `None` for an unknown node.
    fn type_of(&self, node: NodeId) -> Option<TypeId>;

    /// Follow one property, forward or inverse, including its sub-properties.
    ///
    /// A property with no values yields an empty set, never an error.
    fn navigate(&self, node: NodeId, property: PropertyRef) -> BTreeSet<NodeId>;

    /// Every node whose class is `type_id` or one of its subclasses, in ID order.
    fn all_of_type(&self, type_id: TypeId) -> Vec<NodeId>;

    /// Attribute value of a node.
    fn attr(&self, node: NodeId, name: &str) -> Option<&Value>;

    /// Stable external identifier of a node.
    fn uri(&self, node: NodeId) -> Option<&str>;

    /// Check if a node is an instance of `type_id`.
    fn is_instance(&self, node: NodeId, type_id: TypeId) -> bool {
        self.type_of(node)
            .map(|actual| self.registry().is_subtype(actual, type_id))
            .unwrap_or(false)
    }

    /// String attribute value of a node.
    fn attr_str(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attr(node, name).map(Value::as_str)
    }
}

/// [`GraphAccess`] over an in-memory [`Graph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    registry: &'a Registry,
    graph: &'a Graph,
}

impl<'a> GraphView<'a> {
    pub fn new(registry: &'a Registry, graph: &'a Graph) -> Self {
        Self { registry, graph }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }
}

impl GraphAccess for GraphView<'_> {
    fn registry(&self) -> &Registry {
        self.registry
    }

    fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.graph.node(node).map(|n| n.type_id)
    }

    fn navigate(&self, node: NodeId, property: PropertyRef) -> BTreeSet<NodeId> {
        let mut out = BTreeSet::new();
        for id in self.registry.expand_property(property.id) {
            if property.inverse {
                out.extend(self.graph.sources(node, id));
            } else {
                out.extend(self.graph.targets(node, id));
            }
        }
        out
    }

    fn all_of_type(&self, type_id: TypeId) -> Vec<NodeId> {
        let mut out = BTreeSet::new();
        out.extend(self.graph.nodes_of_type(type_id));
        for sub in self.registry.get_subtypes(type_id) {
            out.extend(self.graph.nodes_of_type(sub));
        }
        out.into_iter().collect()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&Value> {
        self.graph.node(node).and_then(|n| n.get_attr(name))
    }

    fn uri(&self, node: NodeId) -> Option<&str> {
        self.graph.node(node).map(|n| n.uri.as_str())
    }
}
