//! Pattern: an ordered list of constraints over named labels.

use crate::constraint::{shared, ConstraintRef, TypeCheck};
use crate::error::{PatternError, PatternResult};
use pax_core::TypeId;
use pax_registry::Registry;
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

/// One registration: a constraint applied to label slots.
#[derive(Debug, Clone)]
pub struct Step {
    pub constraint: ConstraintRef,
    /// Label slot for each constraint position.
    pub slots: Vec<usize>,
    /// Whether the last slot is declared, and generated, by this step.
    pub generates: bool,
}

/// A filtering constraint waiting for its labels to be declared.
#[derive(Debug, Clone)]
struct Deferred {
    constraint: ConstraintRef,
    labels: Vec<String>,
}

/// A declarative sub-graph query.
///
/// The first label is the anchor, bound to each seed. Every later label is
/// declared by the generating constraint that first uses it in last
/// position. Steps run in registration order.
#[derive(Debug, Clone)]
pub struct Pattern {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    anchor_type: TypeId,
    anchor_type_name: String,
    steps: Vec<Step>,
    deferred: Vec<Deferred>,
}

impl Pattern {
    /// Start a pattern whose anchor label is seeded with instances of `anchor_type`.
    pub fn new(
        registry: &Registry,
        anchor_type: &str,
        anchor_label: impl Into<String>,
    ) -> PatternResult<Self> {
        let type_id = registry
            .get_type_id(anchor_type)
            .ok_or_else(|| PatternError::unknown_type(anchor_type))?;
        let label = anchor_label.into();
        Ok(Self {
            labels: vec![label.clone()],
            index: HashMap::from([(label, 0)]),
            anchor_type: type_id,
            anchor_type_name: anchor_type.to_string(),
            steps: Vec::new(),
            deferred: Vec::new(),
        })
    }

    /// Apply a constraint to a tuple of labels.
    ///
    /// All labels but the last must be declared. The last may be new only
    /// if the constraint generates. A filtering constraint over undeclared
    /// labels is held back until they are declared.
    pub fn add(&mut self, constraint: ConstraintRef, labels: &[&str]) -> PatternResult<()> {
        if labels.len() != constraint.arity() {
            return Err(PatternError::arity_mismatch(
                constraint.name(),
                constraint.arity(),
                labels.len(),
            ));
        }

        let missing: Vec<usize> = (0..labels.len())
            .filter(|i| !self.index.contains_key(labels[*i]))
            .collect();

        match missing.as_slice() {
            [] => {
                let slots = self.slots_of(labels);
                self.steps.push(Step {
                    constraint,
                    slots,
                    generates: false,
                });
                Ok(())
            }
            [last]
                if constraint.generates()
                    && *last == labels.len() - 1
                    && !labels[..*last].contains(&labels[*last]) =>
            {
                self.declare(labels[*last]);
                let slots = self.slots_of(labels);
                self.steps.push(Step {
                    constraint,
                    slots,
                    generates: true,
                });
                self.flush_deferred();
                Ok(())
            }
            _ if !constraint.generates() => {
                self.deferred.push(Deferred {
                    constraint,
                    labels: labels.iter().map(|s| s.to_string()).collect(),
                });
                Ok(())
            }
            [first, ..] => Err(PatternError::unbound_label(
                labels[*first],
                constraint.name(),
            )),
        }
    }

    /// Splice another pattern in, renaming its labels positionally.
    ///
    /// `labels[i]` replaces the sub-pattern's i-th label. Its anchor must
    /// map to a label already declared here; a type test for the
    /// sub-pattern's anchor class is added on that label.
    pub fn include(&mut self, sub: &Pattern, labels: &[&str]) -> PatternResult<()> {
        if labels.len() != sub.labels.len() {
            return Err(PatternError::invalid_include(format!(
                "sub-pattern has {} labels, {} given",
                sub.labels.len(),
                labels.len()
            )));
        }
        sub.validate()?;

        let anchor = labels[0];
        if !self.index.contains_key(anchor) {
            return Err(PatternError::invalid_include(format!(
                "anchor '{anchor}' is not declared"
            )));
        }

        self.add(
            shared(TypeCheck::new(sub.anchor_type, sub.anchor_type_name.clone())),
            &[anchor],
        )?;
        for step in &sub.steps {
            let mapped: Vec<&str> = step.slots.iter().map(|s| labels[*s]).collect();
            self.add(step.constraint.clone(), &mapped)?;
        }
        Ok(())
    }

    /// Splice another pattern in under its own label names.
    pub fn include_as_is(&mut self, sub: &Pattern) -> PatternResult<()> {
        let labels: Vec<&str> = sub.labels.iter().map(String::as_str).collect();
        self.include(sub, &labels)
    }

    /// Check that no constraint is still waiting for labels.
    pub fn validate(&self) -> PatternResult<()> {
        match self.deferred.first() {
            Some(d) => {
                let missing: Vec<&str> = d
                    .labels
                    .iter()
                    .filter(|l| !self.index.contains_key(*l))
                    .map(String::as_str)
                    .collect();
                Err(PatternError::unresolved_deferred(
                    d.constraint.name(),
                    missing.join(", "),
                ))
            }
            None => Ok(()),
        }
    }

    fn declare(&mut self, label: &str) {
        self.index.insert(label.to_string(), self.labels.len());
        self.labels.push(label.to_string());
    }

    fn slots_of(&self, labels: &[&str]) -> Vec<usize> {
        labels.iter().filter_map(|l| self.index.get(*l).copied()).collect()
    }

    fn flush_deferred(&mut self) {
        let (ready, waiting): (Vec<Deferred>, Vec<Deferred>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|d| d.labels.iter().all(|l| self.index.contains_key(l)));
        self.deferred = waiting;
        for d in ready {
            let labels: Vec<&str> = d.labels.iter().map(String::as_str).collect();
            let slots = self.slots_of(&labels);
            self.steps.push(Step {
                constraint: d.constraint,
                slots,
                generates: false,
            });
        }
    }

    // ==================== Accessors ====================

    /// Declared labels, in declaration order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub(crate) fn shared_labels(&self) -> Arc<[String]> {
        self.labels.iter().cloned().collect()
    }

    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn anchor_label(&self) -> &str {
        &self.labels[0]
    }

    pub fn anchor_type(&self) -> TypeId {
        self.anchor_type
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of registrations.
    pub fn size(&self) -> usize {
        self.steps.len()
    }

    /// Human-readable listing of the registrations.
    pub fn describe(&self) -> String {
        let mut out = format!("{} : {}\n", self.anchor_label(), self.anchor_type_name);
        for (i, step) in self.steps.iter().enumerate() {
            let labels: Vec<&str> = step.slots.iter().map(|s| self.labels[*s].as_str()).collect();
            let mark = if step.generates { " +" } else { "" };
            let _ = writeln!(
                out,
                "{i:>3}. {}({}){mark}",
                step.constraint.name(),
                labels.join(", ")
            );
        }
        for d in &self.deferred {
            let _ = writeln!(out, "  ?. {}({})", d.constraint.name(), d.labels.join(", "));
        }
        out
    }
}
