//! Search results.

use crate::binding::Match;
use crate::error::{PatternError, PatternResult};
use pax_core::NodeId;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// The complete matches of one search, in the order they were found.
#[derive(Debug, Clone)]
pub struct MatchSet {
    labels: Arc<[String]>,
    matches: Vec<Match>,
}

impl MatchSet {
    pub fn new(labels: Arc<[String]>) -> Self {
        Self {
            labels,
            matches: Vec::new(),
        }
    }

    pub(crate) fn from_matches(labels: Arc<[String]>, matches: Vec<Match>) -> Self {
        Self { labels, matches }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    pub fn first(&self) -> Option<&Match> {
        self.matches.first()
    }

    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Drop matches identical to an earlier one. Returns how many were removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.matches.len();
        let mut seen = HashSet::with_capacity(before);
        self.matches.retain(|m| seen.insert(m.clone()));
        before - self.matches.len()
    }

    /// Keep only the matches satisfying `f`.
    pub fn retain(&mut self, f: impl FnMut(&Match) -> bool) {
        self.matches.retain(f);
    }

    /// Shorten to at most `n` matches.
    pub fn truncate(&mut self, n: usize) {
        self.matches.truncate(n);
    }

    fn slot(&self, label: &str) -> PatternResult<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| PatternError::unknown_label(label))
    }

    /// Distinct node tuples over the given labels, in first-seen order.
    pub fn project(&self, labels: &[&str]) -> PatternResult<Vec<Vec<NodeId>>> {
        let slots = labels
            .iter()
            .map(|l| self.slot(l))
            .collect::<PatternResult<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for m in &self.matches {
            let row: Option<Vec<NodeId>> = slots.iter().map(|s| m.at(*s)).collect();
            if let Some(row) = row {
                if seen.insert(row.clone()) {
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }

    /// Matches grouped by the node bound to `label`.
    pub fn group_by(&self, label: &str) -> PatternResult<BTreeMap<NodeId, Vec<&Match>>> {
        let slot = self.slot(label)?;
        let mut groups: BTreeMap<NodeId, Vec<&Match>> = BTreeMap::new();
        for m in &self.matches {
            if let Some(node) = m.at(slot) {
                groups.entry(node).or_default().push(m);
            }
        }
        Ok(groups)
    }

    /// Every node bound to `label` by some match.
    pub fn distinct_nodes(&self, label: &str) -> PatternResult<BTreeSet<NodeId>> {
        let slot = self.slot(label)?;
        Ok(self.matches.iter().filter_map(|m| m.at(slot)).collect())
    }

    /// Whether some match binds every given label to the given node.
    pub fn contains_tuple(&self, tuple: &[(&str, NodeId)]) -> bool {
        self.matches
            .iter()
            .any(|m| tuple.iter().all(|(label, node)| m.get(label) == Some(*node)))
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl IntoIterator for MatchSet {
    type Item = Match;
    type IntoIter = std::vec::IntoIter<Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl PartialEq for MatchSet {
    /// Set equality: order and repetition are ignored.
    fn eq(&self, other: &Self) -> bool {
        let mine: HashSet<&Match> = self.matches.iter().collect();
        let theirs: HashSet<&Match> = other.matches.iter().collect();
        mine == theirs
    }
}

impl Serialize for MatchSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.matches.len()))?;
        for m in &self.matches {
            seq.serialize_element(m)?;
        }
        seq.end()
    }
}
