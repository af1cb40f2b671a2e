//! Domain error taxonomy.
//!
//! Every failure the roadmap core can produce is one of these variants, so
//! callers (and the transport layer above them) can map each outcome to a
//! distinct response instead of a generic failure.

use crate::NodeStatus;

/// Errors produced by the roadmap domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Unknown id, or an id owned by a different account.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the entity's current state.
    #[error("invalid state: {reason} (current status: {status:?})")]
    InvalidState {
        /// What was attempted
        reason: String,
        /// Status the node was in
        status: NodeStatus,
    },

    /// A concurrent operation on the same node is already in flight.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Malformed generation spec or submission payload.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Broken configuration, e.g. a cyclic prerequisite graph. Detected at
    /// roadmap creation, never at unlock time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing or invalid bearer credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller exceeded the request budget; retryable after backoff.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the window frees up
        retry_after_secs: u64,
    },
}

impl DomainError {
    /// Whether the caller should retry the operation after a delay.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
