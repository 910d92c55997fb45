//! Pattern error types.

use thiserror::Error;

/// Errors that can occur while building or running a pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Unknown class name.
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    /// Unknown property name in a path.
    #[error("Unknown property '{name}'")]
    UnknownProperty { name: String },

    /// Malformed property path.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A constraint combination that cannot be evaluated.
    #[error("Invalid constraint {constraint}: {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// Constraint applied to the wrong number of labels.
    #[error("{constraint} takes {expected} labels, got {actual}")]
    ArityMismatch {
        constraint: String,
        expected: usize,
        actual: usize,
    },

    /// A label is neither declared nor generated by the constraint using it.
    #[error("Label '{label}' is not bound before {constraint}")]
    UnboundLabel { label: String, constraint: String },

    /// Label not declared by the pattern.
    #[error("Unknown label '{label}'")]
    UnknownLabel { label: String },

    /// Malformed sub-pattern inclusion.
    #[error("Invalid include: {message}")]
    InvalidInclude { message: String },

    /// A held-back constraint whose labels were never declared.
    #[error("{constraint} waits on undeclared labels: {labels}")]
    UnresolvedDeferred { constraint: String, labels: String },

    /// A constraint was evaluated with a bound/unbound shape it does not accept.
    #[error("Contract violation: {message}")]
    ContractViolation { message: String },

    /// The search was cancelled through its token.
    #[error("Search cancelled")]
    Cancelled,

    /// The search ran past its deadline.
    #[error("Search deadline exceeded")]
    DeadlineExceeded,
}

impl PatternError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownProperty { name: name.into() }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_constraint(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    pub fn arity_mismatch(constraint: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            constraint: constraint.into(),
            expected,
            actual,
        }
    }

    pub fn unbound_label(label: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::UnboundLabel {
            label: label.into(),
            constraint: constraint.into(),
        }
    }

    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            label: label.into(),
        }
    }

    pub fn invalid_include(message: impl Into<String>) -> Self {
        Self::InvalidInclude {
            message: message.into(),
        }
    }

    pub fn unresolved_deferred(constraint: impl Into<String>, labels: impl Into<String>) -> Self {
        Self::UnresolvedDeferred {
            constraint: constraint.into(),
            labels: labels.into(),
        }
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }

    /// Whether this error stems from pattern construction rather than a run.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::ContractViolation { .. } | Self::Cancelled | Self::DeadlineExceeded
        )
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
