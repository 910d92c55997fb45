use super::Constraint;
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::{NodeId, TypeId};
use pax_registry::Registry;

/// True iff the node is an instance of a class.
#[derive(Debug, Clone)]
pub struct TypeCheck {
    type_id: TypeId,
    type_name: String,
}

impl TypeCheck {
    pub fn new(type_id: TypeId, type_name: impl Into<String>) -> Self {
        Self {
            type_id,
            type_name: type_name.into(),
        }
    }

    /// Resolve the class by name.
    pub fn named(registry: &Registry, type_name: &str) -> PatternResult<Self> {
        let type_id = registry
            .get_type_id(type_name)
            .ok_or_else(|| PatternError::unknown_type(type_name))?;
        Ok(Self::new(type_id, type_name))
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl Constraint for TypeCheck {
    fn name(&self) -> String {
        format!("type({})", self.type_name)
    }

    fn arity(&self) -> usize {
        1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        nodes
            .first()
            .map(|n| graph.is_instance(*n, self.type_id))
            .unwrap_or(false)
    }
}
