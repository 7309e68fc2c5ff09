//! Domain error model.

use thiserror::Error;

use crate::id::MovieId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Expected business outcomes such as "not eligible for
/// promotion yet" are not errors and are modelled as plain results instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The customer already holds a non-expired purchase of this movie.
    #[error("movie {movie_id} is already actively purchased")]
    DuplicateActivePurchase { movie_id: MovieId },

    /// An operation was invoked while its precondition did not hold.
    ///
    /// This signals caller misuse. It must not be retried.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A conflict occurred (e.g. stale version / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate_active_purchase(movie_id: MovieId) -> Self {
        Self::DuplicateActivePurchase { movie_id }
    }

    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the caller may reasonably recover (retry with other input, ignore).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ContractViolation(_) | Self::InvariantViolation(_))
    }
}
