use super::{Constraint, ConstraintRef};
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::NodeId;
use std::collections::BTreeSet;

/// Adds the source node itself to a generator's candidates.
#[derive(Debug, Clone)]
pub struct SelfOrThis {
    inner: ConstraintRef,
}

impl SelfOrThis {
    pub fn new(inner: ConstraintRef) -> PatternResult<Self> {
        if !inner.generates() || inner.arity() != 2 {
            return Err(PatternError::invalid_constraint(
                format!("self_or({})", inner.name()),
                "wrapped constraint must be a binary generator",
            ));
        }
        Ok(Self { inner })
    }
}

impl Constraint for SelfOrThis {
    fn name(&self) -> String {
        format!("self_or({})", self.inner.name())
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let mut out = self.inner.generate(graph, bound);
        if let [source] = bound {
            out.insert(*source);
        }
        out
    }
}

/// Binary generators applied one after another.
///
/// Each link is fed every candidate of the previous one.
#[derive(Debug, Clone)]
pub struct Chain {
    links: Vec<ConstraintRef>,
}

impl Chain {
    pub fn new(links: Vec<ConstraintRef>) -> PatternResult<Self> {
        if links.is_empty() {
            return Err(PatternError::invalid_constraint("chain", "no links"));
        }
        if let Some(bad) = links.iter().find(|c| !c.generates() || c.arity() != 2) {
            return Err(PatternError::invalid_constraint(
                format!("chain({})", bad.name()),
                "every link must be a binary generator",
            ));
        }
        Ok(Self { links })
    }
}

impl Constraint for Chain {
    fn name(&self) -> String {
        let names: Vec<String> = self.links.iter().map(|c| c.name()).collect();
        format!("chain({})", names.join(" -> "))
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let mut frontier: BTreeSet<NodeId> = bound.iter().copied().collect();
        for link in &self.links {
            frontier = frontier
                .iter()
                .flat_map(|n| link.generate(graph, &[*n]))
                .collect();
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }
}
