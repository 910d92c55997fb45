//! Indexes for efficient graph lookups.

use pax_core::{NodeId, PropertyId, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Type index: TypeId -> Set<NodeId>
///
/// Sets are ordered so that enumeration, and therefore seed order, is stable.
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<TypeId, BTreeSet<NodeId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: TypeId, node_id: NodeId) {
        self.index.entry(type_id).or_default().insert(node_id);
    }

    pub fn get(&self, type_id: TypeId) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

type PropertyMap = HashMap<PropertyId, BTreeSet<NodeId>>;

/// Adjacency index: NodeId -> { outbound: Map<PropertyId, Set<NodeId>>, inbound: ... }
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Targets reached from a node through a property.
    outbound: HashMap<NodeId, PropertyMap>,
    /// Sources reaching a node through a property.
    inbound: HashMap<NodeId, PropertyMap>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link. Returns `false` if it was already present.
    pub fn insert(&mut self, source: NodeId, property: PropertyId, target: NodeId) -> bool {
        let added = self
            .outbound
            .entry(source)
            .or_default()
            .entry(property)
            .or_default()
            .insert(target);
        self.inbound
            .entry(target)
            .or_default()
            .entry(property)
            .or_default()
            .insert(source);
        added
    }

    /// Targets of `node` through `property`.
    pub fn targets(&self, node: NodeId, property: PropertyId) -> impl Iterator<Item = NodeId> + '_ {
        Self::lookup(&self.outbound, node, property)
    }

    /// Sources pointing at `node` through `property`.
    pub fn sources(&self, node: NodeId, property: PropertyId) -> impl Iterator<Item = NodeId> + '_ {
        Self::lookup(&self.inbound, node, property)
    }

    fn lookup(
        index: &HashMap<NodeId, PropertyMap>,
        node: NodeId,
        property: PropertyId,
    ) -> impl Iterator<Item = NodeId> + '_ {
        index
            .get(&node)
            .and_then(|props| props.get(&property))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All links as `(source, property, target)`.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, PropertyId, NodeId)> + '_ {
        self.outbound.iter().flat_map(|(source, props)| {
            props
                .iter()
                .flat_map(move |(p, set)| set.iter().map(move |t| (*source, *p, *t)))
        })
    }
}
