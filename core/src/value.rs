//! Attribute values.
//!
//! Attributes carry display names and controlled-vocabulary terms such as
//! `controlType` or `conversionDirection`, so a value is always text.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A term or name attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(s.to_string())
    }
}

/// Attribute storage of a node.
pub type Attributes = HashMap<String, Value>;
