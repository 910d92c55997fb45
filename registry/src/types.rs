//! Schema definition types.

use pax_core::{PropertyId, TypeId};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Class definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Class name.
    pub name: String,
    /// Parent class IDs (for inheritance).
    pub parent_ids: Vec<TypeId>,
    /// Whether this class is abstract (has no direct instances).
    pub is_abstract: bool,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            is_abstract: false,
        }
    }
}

/// Directed property definition.
///
/// A property links an instance of `domain` to an instance of `range`. When
/// `inverse_name` is set the same links can be walked backwards under that
/// name. A property with a `parent` is a sub-property: walking the parent
/// also walks every sub-property.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Unique identifier.
    pub id: PropertyId,
    /// Forward name.
    pub name: String,
    /// Class of the link source.
    pub domain: TypeId,
    /// Class of the link target.
    pub range: TypeId,
    /// Name under which the property is navigable from target to source.
    pub inverse_name: Option<String>,
    /// Super-property, if any.
    pub parent: Option<PropertyId>,
}

impl PropertyDef {
    pub fn new(id: PropertyId, name: impl Into<String>, domain: TypeId, range: TypeId) -> Self {
        Self {
            id,
            name: name.into(),
            domain,
            range,
            inverse_name: None,
            parent: None,
        }
    }
}

/// A property together with the direction it is walked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub id: PropertyId,
    /// `true` when walking from range to domain.
    pub inverse: bool,
}

impl PropertyRef {
    pub fn forward(id: PropertyId) -> Self {
        Self { id, inverse: false }
    }

    pub fn inverse(id: PropertyId) -> Self {
        Self { id, inverse: true }
    }
}

/// Precomputed, transitively closed parent/child relationships.
///
/// Used for the class hierarchy and for the property hierarchy alike.
#[derive(Debug)]
pub struct HierarchyIndex<K> {
    /// For each key, the set of all its descendants.
    descendants: HashMap<K, HashSet<K>>,
    /// For each key, the set of all its ancestors.
    ancestors: HashMap<K, HashSet<K>>,
}

impl<K> Default for HierarchyIndex<K> {
    fn default() -> Self {
        Self {
            descendants: HashMap::new(),
            ancestors: HashMap::new(),
        }
    }
}

/// Subclass relationships.
pub type SubtypeIndex = HierarchyIndex<TypeId>;

/// Sub-property relationships.
pub type SubpropertyIndex = HierarchyIndex<PropertyId>;

impl<K: Copy + Eq + Hash> HierarchyIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from `(key, direct parents)` pairs.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, &'a [K])>,
        K: 'a,
    {
        let mut index = Self::new();
        let entries: Vec<(K, &[K])> = entries.into_iter().collect();

        for (key, _) in &entries {
            index.descendants.entry(*key).or_default();
            index.ancestors.entry(*key).or_default();
        }

        // Direct parents first
        for (key, parents) in &entries {
            for parent in parents.iter() {
                index.descendants.entry(*parent).or_default().insert(*key);
                index.ancestors.entry(*key).or_default().insert(*parent);
            }
        }

        // Transitively close until nothing changes
        let keys: Vec<K> = entries.iter().map(|(k, _)| *k).collect();
        let mut changed = true;
        while changed {
            changed = false;
            for &key in &keys {
                let direct: Vec<K> = index
                    .ancestors
                    .get(&key)
                    .map(|s| s.iter().copied().collect())
                    .unwrap_or_default();

                for ancestor in direct {
                    let transitive: Vec<K> = index
                        .ancestors
                        .get(&ancestor)
                        .map(|s| s.iter().copied().collect())
                        .unwrap_or_default();

                    for trans in transitive {
                        if let Some(set) = index.ancestors.get_mut(&key) {
                            if set.insert(trans) {
                                changed = true;
                            }
                        }
                        index.descendants.entry(trans).or_default().insert(key);
                    }
                }
            }
        }

        index
    }

    /// Check if `sub` equals or descends from `ancestor`.
    pub fn is_descendant(&self, sub: K, ancestor: K) -> bool {
        if sub == ancestor {
            return true;
        }
        self.ancestors
            .get(&sub)
            .map(|set| set.contains(&ancestor))
            .unwrap_or(false)
    }

    /// All descendants of a key (not including the key itself).
    pub fn descendants(&self, key: K) -> impl Iterator<Item = K> + '_ {
        self.descendants
            .get(&key)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All ancestors of a key (not including the key itself).
    pub fn ancestors(&self, key: K) -> impl Iterator<Item = K> + '_ {
        self.ancestors
            .get(&key)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
