//! Constraints: predicates and candidate generators over label tuples.
//!
//! A constraint is applied to an ordered tuple of labels. A filtering
//! constraint sees every label bound and answers yes or no. A generating
//! constraint may also be asked, with all but its last label bound, for the
//! candidate nodes of that last label.

mod compose;
mod domain;
mod equality;
mod linked;
mod logic;
mod path;
mod size;
mod type_check;

pub use compose::{Chain, SelfOrThis};
pub use domain::{
    Activity, ControlSign, DifferentialActivity, FeatureMap, InputOrOutput, ModificationChange,
    NotUbique, OtherSide, ParticipatesInConv, ParticipatingPe, PeChainsIntersect, RelType,
    RelatedControl,
};
pub use equality::Equality;
pub use linked::{LinkDirection, LinkedPe};
pub use logic::{And, MappedConst, Not, Or};
pub use path::{MultiPath, PathConstraint, Segment};
pub use size::{Empty, Size, SizeKind};
pub use type_check::TypeCheck;

use crate::adapter::GraphAccess;
use pax_core::NodeId;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a constraint.
pub type ConstraintRef = Arc<dyn Constraint>;

/// A predicate, and optionally a generator, over an ordered tuple of nodes.
pub trait Constraint: Send + Sync + fmt::Debug {
    /// Short description used in pattern listings and errors.
    fn name(&self) -> String;

    /// Number of labels the constraint is applied to.
    fn arity(&self) -> usize;

    /// Whether the last label may be unbound and filled by [`generate`].
    ///
    /// [`generate`]: Constraint::generate
    fn generates(&self) -> bool {
        false
    }

    /// Test a fully bound tuple. `nodes.len()` equals [`arity`].
    ///
    /// The default answers through [`generate`], which suits generators.
    ///
    /// [`arity`]: Constraint::arity
    /// [`generate`]: Constraint::generate
    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        match nodes.split_last() {
            Some((last, bound)) if self.generates() => self.generate(graph, bound).contains(last),
            _ => false,
        }
    }

    /// Candidates for the last label given the others. `bound.len()` is
    /// `arity() - 1`.
    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let _ = (graph, bound);
        BTreeSet::new()
    }
}

/// Wrap a concrete constraint into a shared handle.
pub fn shared<C: Constraint + 'static>(constraint: C) -> ConstraintRef {
    Arc::new(constraint)
}
