//! PAX Registry
//!
//! Runtime ontology lookup: classes, their inheritance, and the named
//! directed properties that connect them. The registry is immutable after
//! construction via RegistryBuilder.

mod biopax;
mod builder;
mod registry;
mod types;

pub use biopax::{biopax, vocab};
pub use builder::{RegistryBuilder, RegistryError};
pub use registry::Registry;
pub use types::*;
