//! Pathway-specific relations.
//!
//! These encode participation, control and activity relationships that the
//! generic path vocabulary cannot express directly. Conversion sides are
//! read through the conversion's direction, which defaults to left to right;
//! a catalysis direction on the controlling node overrides it.

use super::{Constraint, LinkDirection, LinkedPe};
use crate::adapter::GraphAccess;
use crate::error::{PatternError, PatternResult};
use pax_core::{NodeId, TypeId};
use pax_registry::{vocab, PropertyRef, Registry};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Role of a physical entity in a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelType {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    LeftToRight,
    RightToLeft,
    Reversible,
}

impl Flow {
    fn parse(term: Option<&str>) -> Option<Self> {
        match term? {
            vocab::LEFT_TO_RIGHT => Some(Flow::LeftToRight),
            vocab::RIGHT_TO_LEFT => Some(Flow::RightToLeft),
            vocab::REVERSIBLE => Some(Flow::Reversible),
            _ => None,
        }
    }
}

/// Schema handles used by every relation in this module.
#[derive(Debug, Clone, Copy)]
struct Terms {
    left: PropertyRef,
    right: PropertyRef,
    participant_of: PropertyRef,
    controller_of: PropertyRef,
    controlled_of: PropertyRef,
    entity_reference: PropertyRef,
    feature: PropertyRef,
    conversion: TypeId,
    control: TypeId,
}

impl Terms {
    fn resolve(registry: &Registry) -> PatternResult<Self> {
        let prop = |name: &str| {
            registry
                .resolve_property(name)
                .ok_or_else(|| PatternError::unknown_property(name))
        };
        let class = |name: &str| {
            registry
                .get_type_id(name)
                .ok_or_else(|| PatternError::unknown_type(name))
        };
        Ok(Self {
            left: prop("left")?,
            right: prop("right")?,
            participant_of: prop("participantOf")?,
            controller_of: prop("controllerOf")?,
            controlled_of: prop("controlledOf")?,
            entity_reference: prop("entityReference")?,
            feature: prop("feature")?,
            conversion: class("Conversion")?,
            control: class("Control")?,
        })
    }

    fn flow(&self, graph: &dyn GraphAccess, conv: NodeId) -> Flow {
        Flow::parse(graph.attr_str(conv, vocab::CONVERSION_DIRECTION)).unwrap_or(Flow::LeftToRight)
    }

    /// Direction as seen by a control, whose catalysis direction wins.
    fn flow_for(&self, graph: &dyn GraphAccess, control: NodeId, conv: NodeId) -> Flow {
        match Flow::parse(graph.attr_str(control, vocab::CATALYSIS_DIRECTION)) {
            Some(flow @ (Flow::LeftToRight | Flow::RightToLeft)) => flow,
            _ => self.flow(graph, conv),
        }
    }

    /// Participants of `conv` playing `rel`.
    fn side(
        &self,
        graph: &dyn GraphAccess,
        conv: NodeId,
        rel: RelType,
        flow: Flow,
        treat_reversible: bool,
    ) -> BTreeSet<NodeId> {
        if !graph.is_instance(conv, self.conversion) {
            return BTreeSet::new();
        }
        let left_first = match (flow, rel) {
            (Flow::Reversible, _) if treat_reversible => {
                let mut both = graph.navigate(conv, self.left);
                both.extend(graph.navigate(conv, self.right));
                return both;
            }
            (Flow::RightToLeft, RelType::Output) => true,
            (Flow::RightToLeft, RelType::Input) => false,
            (_, RelType::Input) => true,
            (_, RelType::Output) => false,
        };
        if left_first {
            graph.navigate(conv, self.left)
        } else {
            graph.navigate(conv, self.right)
        }
    }

    fn conversions_of(&self, graph: &dyn GraphAccess, pe: NodeId) -> Vec<NodeId> {
        graph
            .navigate(pe, self.participant_of)
            .into_iter()
            .filter(|n| graph.is_instance(*n, self.conversion))
            .collect()
    }

    fn is_active(&self, graph: &dyn GraphAccess, pe: NodeId) -> bool {
        !graph.navigate(pe, self.controller_of).is_empty()
    }
}

/// Generates the conversions a physical entity takes part in as `rel`.
#[derive(Debug, Clone)]
pub struct ParticipatesInConv {
    terms: Terms,
    rel: RelType,
    treat_reversible: bool,
}

impl ParticipatesInConv {
    pub fn new(registry: &Registry, rel: RelType, treat_reversible: bool) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            rel,
            treat_reversible,
        })
    }
}

impl Constraint for ParticipatesInConv {
    fn name(&self) -> String {
        format!("participates_in_conv({:?})", self.rel)
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let [pe] = bound else {
            return BTreeSet::new();
        };
        let t = &self.terms;
        t.conversions_of(graph, *pe)
            .into_iter()
            .filter(|conv| {
                t.side(graph, *conv, self.rel, t.flow(graph, *conv), self.treat_reversible)
                    .contains(pe)
            })
            .collect()
    }
}

/// Generates the inputs or outputs of a conversion.
#[derive(Debug, Clone)]
pub struct InputOrOutput {
    terms: Terms,
    rel: RelType,
    treat_reversible: bool,
}

impl InputOrOutput {
    pub fn new(registry: &Registry, rel: RelType, treat_reversible: bool) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            rel,
            treat_reversible,
        })
    }
}

impl Constraint for InputOrOutput {
    fn name(&self) -> String {
        format!("{:?}_of", self.rel).to_lowercase()
    }

    fn arity(&self) -> usize {
        2
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let [conv] = bound else {
            return BTreeSet::new();
        };
        let t = &self.terms;
        t.side(graph, *conv, self.rel, t.flow(graph, *conv), self.treat_reversible)
    }
}

/// Over `(pe, conversion, other)`: generates the participants on the side
/// of the conversion opposite to `pe`.
#[derive(Debug, Clone)]
pub struct OtherSide {
    terms: Terms,
}

impl OtherSide {
    pub fn new(registry: &Registry) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
        })
    }
}

impl Constraint for OtherSide {
    fn name(&self) -> String {
        "other_side".to_string()
    }

    fn arity(&self) -> usize {
        3
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let [pe, conv] = bound else {
            return BTreeSet::new();
        };
        if !graph.is_instance(*conv, self.terms.conversion) {
            return BTreeSet::new();
        }
        let left = graph.navigate(*conv, self.terms.left);
        let right = graph.navigate(*conv, self.terms.right);

        let mut out = BTreeSet::new();
        if left.contains(pe) {
            out.extend(&right);
        }
        if right.contains(pe) {
            out.extend(&left);
        }
        out
    }
}

/// Over `(control, conversion, pe)`: generates the participants playing
/// `rel` in the conversion, in the direction the control imposes.
#[derive(Debug, Clone)]
pub struct ParticipatingPe {
    terms: Terms,
    rel: RelType,
    treat_reversible: bool,
}

impl ParticipatingPe {
    pub fn new(registry: &Registry, rel: RelType, treat_reversible: bool) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            rel,
            treat_reversible,
        })
    }
}

impl Constraint for ParticipatingPe {
    fn name(&self) -> String {
        format!("participating_pe({:?})", self.rel)
    }

    fn arity(&self) -> usize {
        3
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let [control, conv] = bound else {
            return BTreeSet::new();
        };
        let t = &self.terms;
        let flow = t.flow_for(graph, *control, *conv);
        t.side(graph, *conv, self.rel, flow, self.treat_reversible)
    }
}

/// Over `(pe, conversion, control)`: generates the controls, direct or
/// nested, of the conversion under which `pe` plays `rel`.
#[derive(Debug, Clone)]
pub struct RelatedControl {
    terms: Terms,
    rel: RelType,
}

impl RelatedControl {
    pub fn new(registry: &Registry, rel: RelType) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            rel,
        })
    }
}

impl Constraint for RelatedControl {
    fn name(&self) -> String {
        format!("related_control({:?})", self.rel)
    }

    fn arity(&self) -> usize {
        3
    }

    fn generates(&self) -> bool {
        true
    }

    fn generate(&self, graph: &dyn GraphAccess, bound: &[NodeId]) -> BTreeSet<NodeId> {
        let [pe, conv] = bound else {
            return BTreeSet::new();
        };
        let t = &self.terms;

        // Controls of the conversion, then controls of those controls
        let mut controls = BTreeSet::new();
        let mut queue = VecDeque::from([*conv]);
        while let Some(node) = queue.pop_front() {
            for ctrl in graph.navigate(node, t.controlled_of) {
                if graph.is_instance(ctrl, t.control) && controls.insert(ctrl) {
                    queue.push_back(ctrl);
                }
            }
        }

        controls
            .into_iter()
            .filter(|ctrl| {
                let flow = t.flow_for(graph, *ctrl, *conv);
                t.side(graph, *conv, self.rel, flow, true).contains(pe)
            })
            .collect()
    }
}

/// True iff the node's activity, being a controller of something, matches.
#[derive(Debug, Clone)]
pub struct Activity {
    terms: Terms,
    active: bool,
}

impl Activity {
    pub fn new(registry: &Registry, active: bool) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            active,
        })
    }
}

impl Constraint for Activity {
    fn name(&self) -> String {
        format!("activity({})", self.active)
    }

    fn arity(&self) -> usize {
        1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        match nodes {
            [pe] => self.terms.is_active(graph, *pe) == self.active,
            _ => false,
        }
    }
}

/// Over `(before, after)`: true iff the entity gains activity
/// (`activating`) or loses it.
#[derive(Debug, Clone)]
pub struct DifferentialActivity {
    terms: Terms,
    activating: bool,
}

impl DifferentialActivity {
    pub fn new(registry: &Registry, activating: bool) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            activating,
        })
    }
}

impl Constraint for DifferentialActivity {
    fn name(&self) -> String {
        format!("differential_activity({})", self.activating)
    }

    fn arity(&self) -> usize {
        2
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let [before, after] = nodes else {
            return false;
        };
        let was = self.terms.is_active(graph, *before);
        let is = self.terms.is_active(graph, *after);
        if self.activating {
            !was && is
        } else {
            was && !is
        }
    }
}

/// Modification terms known to switch an entity on or off, per entity
/// reference.
pub type FeatureMap = HashMap<NodeId, HashSet<String>>;

/// Over `(before, after)`: true iff the modifications gained or lost
/// between the two states activate (or inactivate) the entity.
#[derive(Debug, Clone)]
pub struct ModificationChange {
    terms: Terms,
    activating: bool,
    activity_features: FeatureMap,
    inactivity_features: FeatureMap,
}

impl ModificationChange {
    pub fn new(
        registry: &Registry,
        activating: bool,
        activity_features: FeatureMap,
        inactivity_features: FeatureMap,
    ) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            activating,
            activity_features,
            inactivity_features,
        })
    }

    fn modifications(&self, graph: &dyn GraphAccess, pe: NodeId) -> BTreeSet<String> {
        graph
            .navigate(pe, self.terms.feature)
            .into_iter()
            .filter_map(|f| graph.attr_str(f, vocab::MODIFICATION_TYPE).map(str::to_string))
            .collect()
    }

    fn known(map: &FeatureMap, refs: &BTreeSet<NodeId>, terms: &BTreeSet<&String>) -> bool {
        refs.iter()
            .filter_map(|er| map.get(er))
            .any(|known| terms.iter().any(|t| known.contains(*t)))
    }
}

impl Constraint for ModificationChange {
    fn name(&self) -> String {
        format!("modification_change({})", self.activating)
    }

    fn arity(&self) -> usize {
        2
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let [before, after] = nodes else {
            return false;
        };
        let mut refs = graph.navigate(*before, self.terms.entity_reference);
        refs.extend(graph.navigate(*after, self.terms.entity_reference));

        let old = self.modifications(graph, *before);
        let new = self.modifications(graph, *after);
        let gained: BTreeSet<&String> = new.difference(&old).collect();
        let lost: BTreeSet<&String> = old.difference(&new).collect();

        let (on, off) = if self.activating {
            (&self.activity_features, &self.inactivity_features)
        } else {
            (&self.inactivity_features, &self.activity_features)
        };
        Self::known(on, &refs, &gained) || Self::known(off, &refs, &lost)
    }
}

/// True iff neither the node nor its entity reference is a ubiquitous
/// molecule.
#[derive(Debug, Clone)]
pub struct NotUbique {
    terms: Terms,
    uris: HashSet<String>,
}

impl NotUbique {
    pub fn new(registry: &Registry, uris: HashSet<String>) -> PatternResult<Self> {
        Ok(Self {
            terms: Terms::resolve(registry)?,
            uris,
        })
    }

    fn is_ubique(&self, graph: &dyn GraphAccess, node: NodeId) -> bool {
        graph.uri(node).is_some_and(|u| self.uris.contains(u))
    }
}

impl Constraint for NotUbique {
    fn name(&self) -> String {
        format!("not_ubique({})", self.uris.len())
    }

    fn arity(&self) -> usize {
        1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let [pe] = nodes else {
            return false;
        };
        !self.is_ubique(graph, *pe)
            && !graph
                .navigate(*pe, self.terms.entity_reference)
                .into_iter()
                .any(|er| self.is_ubique(graph, er))
    }
}

/// True iff a control's type is positive (activation, the default) or
/// negative (inhibition).
#[derive(Debug, Clone, Copy)]
pub struct ControlSign {
    positive: bool,
}

impl ControlSign {
    pub fn new(positive: bool) -> Self {
        Self { positive }
    }
}

impl Constraint for ControlSign {
    fn name(&self) -> String {
        if self.positive {
            "positive_control".to_string()
        } else {
            "negative_control".to_string()
        }
    }

    fn arity(&self) -> usize {
        1
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let [control] = nodes else {
            return false;
        };
        match graph.attr_str(*control, vocab::CONTROL_TYPE) {
            Some(term) if self.positive => term.starts_with(vocab::ACTIVATION),
            Some(term) => term.starts_with(vocab::INHIBITION),
            None => self.positive,
        }
    }
}

/// Over `(pe1, top1, pe2, top2)`: compares the membership chain linking
/// `pe1` up to `top1` with the one linking `pe2` up to `top2`.
///
/// A chain is every node on some upward walk between its two ends. With
/// `ignore_endpoints` the ends themselves do not count as shared.
#[derive(Debug, Clone)]
pub struct PeChainsIntersect {
    up: LinkedPe,
    down: LinkedPe,
    should_intersect: bool,
    ignore_endpoints: bool,
}

impl PeChainsIntersect {
    pub fn new(
        registry: &Registry,
        should_intersect: bool,
        ignore_endpoints: bool,
    ) -> PatternResult<Self> {
        Ok(Self {
            up: LinkedPe::new(registry, LinkDirection::Up)?,
            down: LinkedPe::new(registry, LinkDirection::Down)?,
            should_intersect,
            ignore_endpoints,
        })
    }

    fn chain(&self, graph: &dyn GraphAccess, bottom: NodeId, top: NodeId) -> BTreeSet<NodeId> {
        let above = self.up.reach(graph, bottom);
        let below = self.down.reach(graph, top);
        let mut chain: BTreeSet<NodeId> = above.intersection(&below).copied().collect();
        if self.ignore_endpoints {
            chain.remove(&bottom);
            chain.remove(&top);
        }
        chain
    }
}

impl Constraint for PeChainsIntersect {
    fn name(&self) -> String {
        format!("chains_intersect({})", self.should_intersect)
    }

    fn arity(&self) -> usize {
        4
    }

    fn satisfies(&self, graph: &dyn GraphAccess, nodes: &[NodeId]) -> bool {
        let [pe1, top1, pe2, top2] = nodes else {
            return false;
        };
        let first = self.chain(graph, *pe1, *top1);
        let second = self.chain(graph, *pe2, *top2);
        let intersect = !first.is_disjoint(&second);
        intersect == self.should_intersect
    }
}
