use super::Constraint;
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::{NodeId, TypeId};
use pax_registry::{PropertyRef, Registry};
use std::collections::{BTreeSet, VecDeque};

/// Which way [`LinkedPe`] walks the complex hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// Towards enclosing complexes and generic parents.
    Up,
    /// Towards complex components and generic members.
    Down,
}

/// Physical entities linked to the source through complex membership and
/// generic equivalence, the source included.
#[derive(Debug, Clone)]
pub struct LinkedPe {
    direction: LinkDirection,
    physical_entity: TypeId,
    via: [PropertyRef; 2],
}

impl LinkedPe {
    pub fn new(registry: &Registry, direction: LinkDirection) -> PatternResult<Self> {
        let names = match direction {
            LinkDirection::Up => ["componentOf", "memberPhysicalEntityOf"],
            LinkDirection::Down => ["component", "memberPhysicalEntity"],
        };
        let resolve = |name: &str| {
            registry
                .resolve_property(name)
                .ok_or_else(|| PatternError::unknown_property(name))
        };
        Ok(Self {
            direction,
            physical_entity: registry
                .get_type_id("PhysicalEntity")
                .ok_or_else(|| PatternError::unknown_type("PhysicalEntity"))?,
            via: [resolve(names[0])?, resolve(names[1])?],
        })
    }

    /// Everything reachable from `source`, visited once each.
    pub fn reach(&self, graph: &dyn GraphAccess, source: NodeId) -> BTreeSet<NodeId> {
        if !graph.is_instance(source, self.physical_entity) {
            return BTreeSet::new();
        }
        let mut visited = BTreeSet::from([source]);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            for prop in self.via {
                for next in graph.navigate(node, prop) {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        visited
    }
}

impl Constraint for LinkedPe {
    fn name(&self) -> String {
        match self.direction {
            LinkDirection::Up => "link_to_complex".to_string(),
            LinkDirection::Down => "link_to_simple".to_string(),
        }
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        match bound {
            [source] => self.reach(graph, *source),
            _ => BTreeSet::new(),
        }
    }
}
