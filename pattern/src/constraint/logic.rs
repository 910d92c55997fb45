//! Logical combinators.

use super::{Constraint, ConstraintRef};
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::NodeId;
use std::collections::BTreeSet;

/// True iff the wrapped constraint is false.
///
/// Never generates: the wrapped constraint is always evaluated fully bound.
#[derive(Debug, Clone)]
pub struct Not {
    inner: ConstraintRef,
}

impl Not {
    pub fn new(inner: ConstraintRef) -> Self {
        Self { inner }
    }
}

impl Constraint for Not {
    fn name(&self) -> String {
        format!("not({})", self.inner.name())
    }

    fn arity(&self) -> usize {
        self.inner.arity()
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        !self.inner.satisfies(graph, nodes)
    }
}

/// A constraint applied to selected positions of an enclosing tuple.
///
/// `indices[i]` is the enclosing position fed to the inner constraint's
/// position `i`.
#[derive(Debug, Clone)]
pub struct MappedConst {
    inner: ConstraintRef,
    indices: Vec<usize>,
}

impl MappedConst {
    pub fn new(inner: ConstraintRef, indices: &[usize]) -> PatternResult<Self> {
        if indices.len() != inner.arity() {
            return Err(PatternError::arity_mismatch(
                inner.name(),
                inner.arity(),
                indices.len(),
            ));
        }
        Ok(Self {
            inner,
            indices: indices.to_vec(),
        })
    }

    /// Smallest enclosing arity this mapping fits.
    fn span(&self) -> usize {
        self.indices.iter().max().map(|m| m + 1).unwrap_or(0)
    }

    /// Whether this branch can produce candidates for enclosing position `last`.
    fn generates_at(&self, last: usize) -> bool {
        self.inner.generates()
            && self.indices.last() == Some(&last)
            && self.indices[..self.indices.len() - 1]
                .iter()
                .all(|i| *i < last)
    }

    fn select(&self, nodes: &[NodeId]) -> Option<Vec<NodeId>> {
        self.indices.iter().map(|i| nodes.get(*i).copied()).collect()
    }

    fn test(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        self.select(nodes)
            .map(|mapped| self.inner.satisfies(graph, &mapped))
            .unwrap_or(false)
    }

    fn candidates(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let prefix = &self.indices[..self.indices.len().saturating_sub(1)];
        let mapped: Option<Vec<NodeId>> = prefix.iter().map(|i| bound.get(*i).copied()).collect();
        mapped
            .map(|m| self.inner.generate(graph, &m))
            .unwrap_or_default()
    }

    fn name(&self) -> String {
        format!("{}@{:?}", self.inner.name(), self.indices)
    }
}

/// Shared validation of combinator branches.
///
/// Returns the enclosing arity and whether the combinator generates.
fn check_branches(
    kind: &str,
    branches: &[MappedConst],
    all_generate: bool,
) -> PatternResult<(usize, bool)> {
    if branches.is_empty() {
        return Err(PatternError::invalid_constraint(kind, "no branches"));
    }
    let arity = branches.iter().map(MappedConst::span).max().unwrap_or(0);
    let last = arity.saturating_sub(1);
    let generating = branches.iter().filter(|b| b.generates_at(last)).count();

    let generates = if all_generate {
        // OR can only generate if every branch can
        if generating > 0 && generating < branches.len() {
            return Err(PatternError::invalid_constraint(
                kind,
                "either all branches or none must generate the last label",
            ));
        }
        generating == branches.len()
    } else {
        generating > 0
    };
    Ok((arity, generates))
}

/// Succeeds if any branch does. Generates the union of branch candidates.
#[derive(Debug, Clone)]
pub struct Or {
    branches: Vec<MappedConst>,
    arity: usize,
    generates: bool,
}

impl Or {
    pub fn new(branches: Vec<MappedConst>) -> PatternResult<Self> {
        let (arity, generates) = check_branches("or", &branches, true)?;
        Ok(Self {
            branches,
            arity,
            generates,
        })
    }
}

impl Constraint for Or {
    fn name(&self) -> String {
        let names: Vec<String> = self.branches.iter().map(MappedConst::name).collect();
        format!("or({})", names.join(", "))
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn generates(&self) -> bool {
        self.generates
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        self.branches.iter().any(|b| b.test(graph, nodes))
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        if !self.generates {
            return BTreeSet::new();
        }
        self.branches
            .iter()
            .flat_map(|b| b.candidates(graph, bound))
            .collect()
    }
}

/// Succeeds if every branch does. Generates the candidates all generating
/// branches agree on that also pass the filtering branches.
#[derive(Debug, Clone)]
pub struct And {
    branches: Vec<MappedConst>,
    arity: usize,
    generates: bool,
}

impl And {
    pub fn new(branches: Vec<MappedConst>) -> PatternResult<Self> {
        let (arity, generates) = check_branches("and", &branches, false)?;
        Ok(Self {
            branches,
            arity,
            generates,
        })
    }
}

impl Constraint for And {
    fn name(&self) -> String {
        let names: Vec<String> = self.branches.iter().map(MappedConst::name).collect();
        format!("and({})", names.join(", "))
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn generates(&self) -> bool {
        self.generates
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        self.branches.iter().all(|b| b.test(graph, nodes))
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        if !self.generates {
            return BTreeSet::new();
        }
        let last = self.arity - 1;

        let mut candidates: Option<BTreeSet<NodeId>> = None;
        for branch in self.branches.iter().filter(|b| b.generates_at(last)) {
            let found = branch.candidates(graph, bound);
            candidates = Some(match candidates {
                Some(acc) => acc.intersection(&found).copied().collect(),
                None => found,
            });
        }

        let mut full = bound.to_vec();
        full.push(NodeId::new(0));
        candidates
            .unwrap_or_default()
            .into_iter()
            .filter(|c| {
                full[last] = *c;
                self.branches
                    .iter()
                    .filter(|b| !b.generates_at(last))
                    .all(|b| b.test(graph, &full))
            })
            .collect()
    }
}
