//! PAX Pattern
//!
//! Declarative sub-graph patterns over a typed pathway graph.
//!
//! Responsibilities:
//! - Describe patterns as ordered constraints over named labels
//! - Navigate the graph with property paths and domain relations
//! - Enumerate every binding of the labels by backtracking search
//! - Provide a library of ready-made pathway patterns

mod adapter;
mod binding;
mod config;
pub mod constraint;
mod error;
pub mod library;
mod pattern;
pub mod presets;
mod result;
mod search;

#[cfg(test)]
mod testutil;

pub use adapter::{GraphAccess, GraphView};
pub use binding::Match;
pub use config::{CancelToken, SearchOptions};
pub use constraint::{Constraint, ConstraintRef};
pub use error::{PatternError, PatternResult};
pub use pattern::{Pattern, Step};
pub use result::MatchSet;
pub use search::Searcher;
