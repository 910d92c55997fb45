//! Label bindings for pattern matching.

use pax_core::NodeId;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An assignment of pattern labels to graph nodes.
///
/// Slots are indexed by label position in the pattern. During a search a
/// `Match` is partial; the engine only emits it once every slot is bound.
/// Two matches are equal when they bind the same slots to the same nodes.
#[derive(Debug, Clone)]
pub struct Match {
    labels: Arc<[String]>,
    slots: Vec<Option<NodeId>>,
}

impl Match {
    /// Create an empty binding over the given labels.
    pub fn new(labels: Arc<[String]>) -> Self {
        let slots = vec![None; labels.len()];
        Self { labels, slots }
    }

    /// Node bound to a label.
    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.index_of(label).and_then(|i| self.at(i))
    }

    /// Node bound to the slot at `index`.
    pub fn at(&self, index: usize) -> Option<NodeId> {
        self.slots.get(index).copied().flatten()
    }

    /// Bind a slot.
    pub fn bind(&mut self, index: usize, node: NodeId) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(node);
        }
    }

    /// Copy of this binding with one more slot bound.
    pub fn with(&self, index: usize, node: NodeId) -> Self {
        let mut child = self.clone();
        child.bind(index, node);
        child
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.at(index).is_some()
    }

    /// Whether every label is bound.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Bound `(label, node)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.labels
            .iter()
            .zip(&self.slots)
            .filter_map(|(label, slot)| slot.map(|node| (label.as_str(), node)))
    }

    /// Bound nodes in label order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (label, slot) in self.labels.iter().zip(&self.slots) {
            map.serialize_entry(label, slot)?;
        }
        map.end()
    }
}
