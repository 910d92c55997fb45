//! PAX Graph Storage
//!
//! In-memory typed object graph with indexed access:
//! - Node storage with URI lookup
//! - Type index: find nodes by class
//! - Adjacency index: follow a property forwards or backwards

mod graph;
mod index;

pub use graph::*;
