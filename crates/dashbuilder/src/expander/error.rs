//! Error types for template expansion.

use thiserror::Error;

use crate::error::ErrorKind;

/// An error that occurred while expanding templates and placeholders.
#[derive(Debug, Error, PartialEq)]
pub enum ExpandError {
    /// A placeholder name recurred while it was still being resolved.
    #[error("cyclic placeholder substitution: {}", chain.join(" -> "))]
    CyclicSubstitution { chain: Vec<String> },

    /// A placeholder path does not resolve in the active scope.
    #[error("placeholder path '{path}' not found (missing '{segment}' in {snippet})")]
    PathLookup {
        path: String,
        segment: String,
        snippet: String,
    },

    /// A template directive is missing `body` or has the wrong shape.
    #[error("malformed template: {reason} (in template = {snippet})")]
    MalformedTemplate { reason: String, snippet: String },

    /// A template argument shadows a binding of an enclosing template.
    #[error("template argument '{argument}' collides with an enclosing binding (in template = {snippet})")]
    ArgumentScopeCollision { argument: String, snippet: String },

    /// Maximum recursion depth exceeded.
    #[error("maximum expansion depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },
}

impl ExpandError {
    /// The error kind, shared with build errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpandError::CyclicSubstitution { .. } => ErrorKind::CyclicSubstitution,
            ExpandError::PathLookup { .. } => ErrorKind::PathLookupFailure,
            ExpandError::MalformedTemplate { .. } => ErrorKind::MalformedTemplate,
            ExpandError::ArgumentScopeCollision { .. } => ErrorKind::ArgumentScopeCollision,
            ExpandError::MaxDepthExceeded { .. } => ErrorKind::DepthLimitExceeded,
        }
    }
}
