//! Cardinality tests over generated sets.

use super::{Constraint, ConstraintRef};
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::NodeId;

/// How a count is compared against its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Equal,
    Min,
    Max,
}

fn require_generator(kind: &str, inner: &ConstraintRef) -> PatternResult<()> {
    if inner.generates() {
        Ok(())
    } else {
        Err(PatternError::invalid_constraint(
            format!("{kind}({})", inner.name()),
            "wrapped constraint must generate",
        ))
    }
}

/// Compares the number of candidates a generator yields.
///
/// Applied to the generator's bound labels only; the generated position is
/// never a label of this constraint.
#[derive(Debug, Clone)]
pub struct Size {
    inner: ConstraintRef,
    count: usize,
    kind: SizeKind,
}

impl Size {
    pub fn new(inner: ConstraintRef, count: usize, kind: SizeKind) -> PatternResult<Self> {
        require_generator("size", &inner)?;
        Ok(Self { inner, count, kind })
    }
}

impl Constraint for Size {
    fn name(&self) -> String {
        let op = match self.kind {
            SizeKind::Equal => "==",
            SizeKind::Min => ">=",
            SizeKind::Max => "<=",
        };
        format!("size({}) {op} {}", self.inner.name(), self.count)
    }

    fn arity(&self) -> usize {
        self.inner.arity() - 1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let n = self.inner.generate(graph, nodes).len();
        match self.kind {
            SizeKind::Equal => n == self.count,
            SizeKind::Min => n >= self.count,
            SizeKind::Max => n <= self.count,
        }
    }
}

/// True iff a generator yields nothing.
#[derive(Debug, Clone)]
pub struct Empty {
    inner: ConstraintRef,
}

impl Empty {
    pub fn new(inner: ConstraintRef) -> PatternResult<Self> {
        require_generator("empty", &inner)?;
        Ok(Self { inner })
    }
}

impl Constraint for Empty {
    fn name(&self) -> String {
        format!("empty({})", self.inner.name())
    }

    fn arity(&self) -> usize {
        self.inner.arity() - 1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        self.inner.generate(graph, nodes).is_empty()
    }
}
