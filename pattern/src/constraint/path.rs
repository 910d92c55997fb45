//! Property-path navigation.
//!
//! Syntax: `Domain/seg/seg...` where each segment is `name`, `name*`,
//! `name:Type` or `name*:Type`. `name` is a forward or inverse property
//! name. `*` takes the reflexive-transitive closure of that segment and
//! `:Type` keeps only the segment's results that are instances of `Type`.

use super::Constraint;
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::{NodeId, TypeId};
use pax_registry::{PropertyRef, Registry};
use std::collections::{BTreeSet, VecDeque};

const SEGMENT: &str = r"^([A-Za-z_][A-Za-z0-9_]*)(\*)?(?::([A-Za-z_][A-Za-z0-9_]*))?$";

/// One step of a path.
#[derive(Debug, Clone)]
pub struct Segment {
    pub property: PropertyRef,
    pub transitive: bool,
    pub filter: Option<TypeId>,
}

/// Generates the nodes reachable from the bound source along a path.
#[derive(Debug, Clone)]
pub struct PathConstraint {
    text: String,
    domain: TypeId,
    segments: Vec<Segment>,
}

impl PathConstraint {
    /// Parse and resolve a path against the schema.
    pub fn parse(registry: &Registry, path: &str) -> PatternResult<Self> {
        let re = regex_lite::Regex::new(SEGMENT)
            .map_err(|e| PatternError::invalid_path(path, e.to_string()))?;

        let mut parts = path.split('/');
        let domain_name = parts.next().unwrap_or_default();
        let domain = registry
            .get_type_id(domain_name)
            .ok_or_else(|| PatternError::unknown_type(domain_name))?;

        let mut segments = Vec::new();
        let mut current = domain;
        for part in parts {
            let caps = re
                .captures(part)
                .ok_or_else(|| PatternError::invalid_path(path, format!("bad segment '{part}'")))?;

            let name = &caps[1];
            let property = registry
                .resolve_property(name)
                .ok_or_else(|| PatternError::unknown_property(name))?;

            // The walk must be able to start from the current class
            let source = registry
                .source_type(property)
                .ok_or_else(|| PatternError::unknown_property(name))?;
            if !registry.is_subtype(current, source) && !registry.is_subtype(source, current) {
                return Err(PatternError::invalid_path(
                    path,
                    format!(
                        "'{name}' does not apply to {}",
                        registry.type_name(current)
                    ),
                ));
            }

            let filter = match caps.get(3) {
                Some(t) => Some(
                    registry
                        .get_type_id(t.as_str())
                        .ok_or_else(|| PatternError::unknown_type(t.as_str()))?,
                ),
                None => None,
            };

            let target = registry.target_type(property).unwrap_or(current);
            current = filter.unwrap_or(target);
            segments.push(Segment {
                property,
                transitive: caps.get(2).is_some(),
                filter,
            });
        }

        if segments.is_empty() {
            return Err(PatternError::invalid_path(path, "no property segment"));
        }

        Ok(Self {
            text: path.to_string(),
            domain,
            segments,
        })
    }

    /// Union of several alternative paths.
    pub fn any_of(registry: &Registry, paths: &[&str]) -> PatternResult<MultiPath> {
        let paths = paths
            .iter()
            .map(|p| Self::parse(registry, p))
            .collect::<PatternResult<Vec<_>>>()?;
        if paths.is_empty() {
            return Err(PatternError::invalid_constraint(
                "any_of",
                "needs at least one path",
            ));
        }
        Ok(MultiPath { paths })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every node the path reaches from `source`.
    pub fn walk(&self, graph: &dyn GraphAccess, source: NodeId) -> BTreeSet<NodeId> {
        if !graph.is_instance(source, self.domain) {
            return BTreeSet::new();
        }

        let mut frontier = BTreeSet::from([source]);
        for segment in &self.segments {
            let reached = if segment.transitive {
                closure(graph, &frontier, segment.property)
            } else {
                frontier
                    .iter()
                    .flat_map(|n| graph.navigate(*n, segment.property))
                    .collect()
            };

            frontier = match segment.filter {
                Some(t) => reached
                    .into_iter()
                    .filter(|n| graph.is_instance(*n, t))
                    .collect(),
                None => reached,
            };
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }
}

/// Reflexive-transitive closure of one property from a start set.
fn closure(
    graph: &dyn GraphAccess,
    start: &BTreeSet<NodeId>,
    property: PropertyRef,
) -> BTreeSet<NodeId> {
    let mut visited = start.clone();
    let mut queue: VecDeque<NodeId> = start.iter().copied().collect();
    while let Some(node) = queue.pop_front() {
        for next in graph.navigate(node, property) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

impl Constraint for PathConstraint {
    fn name(&self) -> String {
        format!("path({})", self.text)
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        match bound {
            [source] => self.walk(graph, *source),
            _ => BTreeSet::new(),
        }
    }
}

/// Generates the union of several paths from the same source.
#[derive(Debug, Clone)]
pub struct MultiPath {
    paths: Vec<PathConstraint>,
}

impl Constraint for MultiPath {
    fn name(&self) -> String {
        let texts: Vec<&str> = self.paths.iter().map(|p| p.text()).collect();
        format!("path({})", texts.join(" | "))
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        match bound {
            [source] => self
                .paths
                .iter()
                .flat_map(|p| p.walk(graph, *source))
                .collect(),
            _ => BTreeSet::new(),
        }
    }
}
