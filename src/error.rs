//! Request-level error taxonomy.
//!
//! Every externally visible operation resolves to one of these variants;
//! transport adapters map them onto status codes, the crate itself only
//! distinguishes the categories.

use crate::storage::StorageError;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed or semantically invalid input. Not retryable.
    #[error("{0}")]
    Validation(String),

    /// A referenced enrollment, schedule or related entity does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Missing or invalid credential. Raised before any business logic runs.
    #[error("missing or invalid credentials")]
    Unauthenticated,

    /// Valid credential, insufficient role or ownership.
    #[error("not authorized: {0}")]
    Forbidden(String),

    /// Payroll upsert failed after a schedule mutation. The schedule write
    /// is already committed when this is returned.
    #[error("salary slip reconciliation failed: {0}")]
    Reconciliation(String),

    /// Persistence layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with the conventional
    /// entity names used across the services.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Shorthand for a [`CoreError::Validation`].
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}
