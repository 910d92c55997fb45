use super::Constraint;
use crate::adapter::GraphAccess;
use pax_core::NodeId;

/// Identity test between two bound nodes.
///
/// With `equal == false` the two labels must be bound to distinct nodes.
#[derive(Debug, Clone, Copy)]
pub struct Equality {
    equal: bool,
}

impl Equality {
    pub fn new(equal: bool) -> Self {
        Self { equal }
    }
}

impl Constraint for Equality {
    fn name(&self) -> String {
        if self.equal {
            "equal".to_string()
        } else {
            "distinct".to_string()
        }
    }

    fn arity(&self) -> usize {
        2
    }

    fn satisfies(&self, _graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        match nodes {
            [a, b] => (a == b) == self.equal,
            _ => false,
        }
    }
}
