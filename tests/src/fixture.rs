//! Hand-written pathway graphs.

use pax_core::{NodeId, Value};
use pax_graph::Graph;
use pax_pattern::{GraphView, MatchSet, Pattern, PatternResult, SearchOptions, Searcher};
use pax_registry::{biopax, Registry};

use crate::error::{FixtureError, FixtureResult};

#[derive(Debug, Clone)]
enum Op {
    Node {
        type_name: String,
        uri: String,
    },
    Link {
        source: String,
        property: String,
        target: String,
    },
    Attr {
        uri: String,
        name: String,
        value: Value,
    },
}

/// Records nodes, links and attributes by URI, then builds them against
/// the pathway ontology.
///
/// ```ignore
/// let f = FixtureBuilder::new()
///     .protein("a")
///     .node("Complex", "C")
///     .link("C", "component", "P:a")
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct FixtureBuilder {
    ops: Vec<Op>,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node of the given class.
    pub fn node(mut self, type_name: &str, uri: &str) -> Self {
        self.ops.push(Op::Node {
            type_name: type_name.to_string(),
            uri: uri.to_string(),
        });
        self
    }

    /// Add a protein `P:{name}` with its reference `PR:{name}`.
    pub fn protein(self, name: &str) -> Self {
        let pr = format!("PR:{name}");
        let p = format!("P:{name}");
        self.node("ProteinReference", &pr)
            .node("Protein", &p)
            .link(&p, "entityReference", &pr)
    }

    /// Add another form `P:{form}` of an existing protein reference.
    pub fn form(self, name: &str, form: &str) -> Self {
        let p = format!("P:{form}");
        self.node("Protein", &p)
            .link(&p, "entityReference", &format!("PR:{name}"))
    }

    /// Link two nodes by a property name, which may be an inverse name.
    pub fn link(mut self, source: &str, property: &str, target: &str) -> Self {
        self.ops.push(Op::Link {
            source: source.to_string(),
            property: property.to_string(),
            target: target.to_string(),
        });
        self
    }

    pub fn attr(mut self, uri: &str, name: &str, value: impl Into<Value>) -> Self {
        self.ops.push(Op::Attr {
            uri: uri.to_string(),
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> FixtureResult<Fixture> {
        let registry = biopax()?;
        let mut graph = Graph::new();

        for op in self.ops {
            match op {
                Op::Node { type_name, uri } => {
                    let type_id = registry
                        .get_type_id(&type_name)
                        .ok_or_else(|| FixtureError::unknown_type(&type_name))?;
                    graph.add_node(type_id, uri)?;
                }
                Op::Link {
                    source,
                    property,
                    target,
                } => {
                    let source = lookup(&graph, &source)?;
                    let target = lookup(&graph, &target)?;
                    graph.link(&registry, source, &property, target)?;
                }
                Op::Attr { uri, name, value } => {
                    let node = lookup(&graph, &uri)?;
                    graph.set_attr(node, name, value)?;
                }
            }
        }

        Ok(Fixture { registry, graph })
    }
}

fn lookup(graph: &Graph, uri: &str) -> FixtureResult<NodeId> {
    graph
        .node_by_uri(uri)
        .ok_or_else(|| FixtureError::unknown_node(uri))
}

/// A built graph together with its ontology.
pub struct Fixture {
    pub registry: Registry,
    pub graph: Graph,
}

impl Fixture {
    pub(crate) fn new(registry: Registry, graph: Graph) -> Self {
        Self { registry, graph }
    }

    /// The node with the given URI.
    pub fn id(&self, uri: &str) -> FixtureResult<NodeId> {
        lookup(&self.graph, uri)
    }

    pub fn ids(&self, uris: &[&str]) -> FixtureResult<Vec<NodeId>> {
        uris.iter().map(|u| self.id(u)).collect()
    }

    pub fn uri(&self, id: NodeId) -> Option<&str> {
        self.graph.node(id).map(|n| n.uri.as_str())
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(&self.registry, &self.graph)
    }

    /// Search with the given options.
    pub fn search_with(&self, pattern: &Pattern, options: SearchOptions) -> PatternResult<MatchSet> {
        let view = self.view();
        Searcher::with_options(&view, options).search(pattern)
    }

    /// Search with default options.
    pub fn search(&self, pattern: &Pattern) -> PatternResult<MatchSet> {
        self.search_with(pattern, SearchOptions::default())
    }

    /// Project matches onto the given labels and render the nodes as URIs.
    pub fn rows(&self, matches: &MatchSet, labels: &[&str]) -> PatternResult<Vec<Vec<String>>> {
        Ok(matches
            .project(labels)?
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|id| self.uri(id).unwrap_or("?").to_string())
                    .collect()
            })
            .collect())
    }
}
