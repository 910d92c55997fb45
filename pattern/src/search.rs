//! Backtracking search over pattern steps.
//!
//! Each seed is explored depth first: a step whose labels are all bound is
//! a test, a step whose last label is unbound forks one branch per
//! generated candidate. Branches own a copy of their binding, so seeds can
//! run on separate threads without sharing state.

use crate::adapter::GraphAccess;
use crate::binding::Match;
use crate::config::{CancelToken, SearchOptions};
use crate::error::{PatternError, PatternResult};
use crate::pattern::{Pattern, Step};
use crate::result::MatchSet;
use pax_core::{NodeId, TypeId};
use rayon::prelude::*;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Runs patterns against a graph.
pub struct Searcher<'g> {
    graph: &'g dyn GraphAccess,
    options: SearchOptions,
}

impl<'g> Searcher<'g> {
    pub fn new(graph: &'g dyn GraphAccess) -> Self {
        Self::with_options(graph, SearchOptions::default())
    }

    pub fn with_options(graph: &'g dyn GraphAccess, options: SearchOptions) -> Self {
        Self { graph, options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Match the pattern from every instance of its anchor class.
    pub fn search(&self, pattern: &Pattern) -> PatternResult<MatchSet> {
        pattern.validate()?;
        let seeds = self.graph.all_of_type(pattern.anchor_type());
        self.run(pattern, &seeds, self.options.max_matches)
    }

    /// Match the pattern from one seed.
    pub fn search_from(&self, pattern: &Pattern, seed: NodeId) -> PatternResult<MatchSet> {
        self.search_seeds(pattern, &[seed])
    }

    /// Match the pattern from the given seeds.
    pub fn search_seeds(&self, pattern: &Pattern, seeds: &[NodeId]) -> PatternResult<MatchSet> {
        pattern.validate()?;
        self.run(pattern, seeds, self.options.max_matches)
    }

    /// Whether at least one match exists from `seed`. Stops at the first.
    pub fn exists(&self, pattern: &Pattern, seed: NodeId) -> PatternResult<bool> {
        pattern.validate()?;
        Ok(!self.run(pattern, &[seed], Some(1))?.is_empty())
    }

    /// The first match over all anchor instances.
    pub fn first(&self, pattern: &Pattern) -> PatternResult<Option<Match>> {
        pattern.validate()?;
        let seeds = self.graph.all_of_type(pattern.anchor_type());
        Ok(self.run(pattern, &seeds, Some(1))?.into_iter().next())
    }

    fn run(
        &self,
        pattern: &Pattern,
        seeds: &[NodeId],
        limit: Option<usize>,
    ) -> PatternResult<MatchSet> {
        let started = Instant::now();
        debug!(
            steps = pattern.size(),
            labels = pattern.labels().len(),
            seeds = seeds.len(),
            parallel = self.options.parallel,
            "search started"
        );

        // Matches from distinct seeds never coincide, so repeated seeds are
        // the only source of duplicates and must not count toward `limit`
        let seeds: Vec<NodeId> = if self.options.dedup {
            let mut seen = HashSet::new();
            seeds.iter().copied().filter(|s| seen.insert(*s)).collect()
        } else {
            seeds.to_vec()
        };

        let labels = pattern.shared_labels();
        let explorer = Explorer {
            graph: self.graph,
            steps: pattern.steps(),
            cancel: self.options.cancel.as_ref(),
            deadline: self.options.deadline_from(started),
            limit,
        };
        let anchor_type = pattern.anchor_type();
        let from_seed = |seed: &NodeId| -> PatternResult<Vec<Match>> {
            let mut found = Vec::new();
            explorer.seed(anchor_type, &labels, *seed, &mut found)?;
            Ok(found)
        };

        let matches: Vec<Match> = match (self.options.parallel, limit) {
            // Later seeds are skipped once an earlier one has produced a match
            (true, Some(1)) => seeds
                .par_iter()
                .map(from_seed)
                .find_map_first(|found| match found {
                    Ok(found) if found.is_empty() => None,
                    other => Some(other),
                })
                .transpose()?
                .unwrap_or_default(),
            // Each seed keeps at most `limit` matches; the merge truncates
            (true, _) => seeds
                .par_iter()
                .map(from_seed)
                .collect::<PatternResult<Vec<Vec<Match>>>>()?
                .into_iter()
                .flatten()
                .collect(),
            (false, _) => {
                let mut found = Vec::new();
                for seed in &seeds {
                    if explorer
                        .seed(anchor_type, &labels, *seed, &mut found)?
                        .is_break()
                    {
                        break;
                    }
                }
                found
            }
        };

        let mut set = MatchSet::from_matches(labels, matches);
        if self.options.dedup {
            let removed = set.dedup();
            if removed > 0 {
                trace!(removed, "dropped duplicate matches");
            }
        }
        if let Some(limit) = limit {
            set.truncate(limit);
        }

        debug!(
            matches = set.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "search finished"
        );
        Ok(set)
    }
}

/// Per-run state shared by every branch.
#[derive(Clone, Copy)]
struct Explorer<'a> {
    graph: &'a dyn GraphAccess,
    steps: &'a [Step],
    cancel: Option<&'a CancelToken>,
    deadline: Option<Instant>,
    limit: Option<usize>,
}

impl Explorer<'_> {
    /// Explore from one seed bound to the anchor label.
    fn seed(
        &self,
        anchor_type: TypeId,
        labels: &Arc<[String]>,
        seed: NodeId,
        out: &mut Vec<Match>,
    ) -> PatternResult<ControlFlow<()>> {
        if !self.graph.is_instance(seed, anchor_type) {
            warn!(seed = %seed, "seed is not an instance of the anchor type");
            return Ok(ControlFlow::Continue(()));
        }
        let mut start = Match::new(labels.clone());
        start.bind(0, seed);
        self.explore(0, start, out)
    }

    fn interrupted(&self) -> PatternResult<()> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(PatternError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(PatternError::DeadlineExceeded);
            }
        }
        Ok(())
    }

    /// Explore from step `index` with `binding`, appending complete matches
    /// to `out`. Breaks once `out` reaches the limit.
    fn explore(
        &self,
        index: usize,
        binding: Match,
        out: &mut Vec<Match>,
    ) -> PatternResult<ControlFlow<()>> {
        self.interrupted()?;

        let Some(step) = self.steps.get(index) else {
            out.push(binding);
            return Ok(match self.limit {
                Some(limit) if out.len() >= limit => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            });
        };

        let nodes: Vec<Option<NodeId>> = step.slots.iter().map(|s| binding.at(*s)).collect();
        let unbound: Vec<usize> = (0..nodes.len()).filter(|i| nodes[*i].is_none()).collect();

        match unbound.as_slice() {
            [] => {
                let bound: Vec<NodeId> = nodes.into_iter().flatten().collect();
                if step.constraint.satisfies(self.graph, &bound) {
                    self.explore(index + 1, binding, out)
                } else {
                    trace!(step = index, constraint = %step.constraint.name(), "pruned");
                    Ok(ControlFlow::Continue(()))
                }
            }
            [last] if step.generates && *last == nodes.len() - 1 => {
                let bound: Vec<NodeId> = nodes[..*last].iter().flatten().copied().collect();
                let slot = step.slots[*last];
                let candidates = step.constraint.generate(self.graph, &bound);
                if candidates.is_empty() {
                    trace!(step = index, constraint = %step.constraint.name(), "no candidates");
                }
                for candidate in candidates {
                    if self
                        .explore(index + 1, binding.with(slot, candidate), out)?
                        .is_break()
                    {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                Ok(ControlFlow::Continue(()))
            }
            _ => Err(PatternError::contract_violation(format!(
                "step {index} ({}) reached with {} unbound label(s)",
                step.constraint.name(),
                unbound.len()
            ))),
        }
    }
}
