//! PAX Core Types
//!
//! This crate provides the foundational types shared by the PAX crates:
//! - Identity types (NodeId, TypeId, PropertyId)
//! - Attribute values (Value)
//! - Entity structures (Node, Link)
//! - Common error types

mod entity;
mod error;
mod id;
mod value;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use value::*;
