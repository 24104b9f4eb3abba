//! Typed error kinds for the domain core.
//!
//! Infrastructure failures (config files, store directories, terminal IO)
//! stay on `anyhow` at the application boundary; everything the domain can
//! fail with is one of these kinds.

use thiserror::Error;

/// Result alias used across the domain core.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field is missing or malformed (direct entry or a
    /// classification result).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced an id absent from its collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duty-rate text did not match the expected percentage pattern.
    #[error("parse error: {0}")]
    Parse(String),

    /// A classification or rendering call failed or timed out.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// An operation ran before its prerequisite state was established,
    /// e.g. document assembly without an exporter profile.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}
