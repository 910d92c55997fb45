//! Small graph builder shared by unit tests.

use crate::adapter::GraphView;
use pax_core::NodeId;
use pax_graph::Graph;
use pax_registry::{biopax, Registry};

pub struct TestGraph {
    pub registry: Registry,
    pub graph: Graph,
}

impl TestGraph {
    pub fn new() -> Self {
        Self {
            registry: biopax().unwrap(),
            graph: Graph::new(),
        }
    }

    pub fn add(&mut self, type_name: &str, uri: &str) -> NodeId {
        let type_id = self.registry.get_type_id(type_name).unwrap();
        self.graph.add_node(type_id, uri).unwrap()
    }

    pub fn link(&mut self, source: NodeId, property: &str, target: NodeId) {
        self.graph
            .link(&self.registry, source, property, target)
            .unwrap();
    }

    pub fn set(&mut self, node: NodeId, name: &str, value: &str) {
        self.graph.set_attr(node, name, value).unwrap();
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(&self.registry, &self.graph)
    }
}
