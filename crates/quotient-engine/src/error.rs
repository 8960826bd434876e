//! # Application Error Taxonomy
//!
//! What the UI layer sees when a use case fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Quotient                               │
//! │                                                                         │
//! │  quotient-core                 quotient-engine (this file)              │
//! │  ─────────────                 ────────────────────────────             │
//! │                                                                         │
//! │  ValidationError ────────────► EngineError::Validation   (verbatim,    │
//! │                                  field-named, NEVER wrapped)            │
//! │                                                                         │
//! │  missing repository ids ─────► EngineError::NotFound { ids }            │
//! │                                                                         │
//! │  CoreError (domain rules) ───► EngineError::BusinessRule                │
//! │                                                                         │
//! │  RepositoryError ────────────► EngineError::Infrastructure              │
//! │                                                                         │
//! │  anything unexpected ────────► EngineError::Application (message       │
//! │                                  preserved, generic retry prompt)       │
//! │                                                                         │
//! │  Known kinds → UI shows field/message. Unknown → generic retry.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use quotient_core::{CoreError, ValidationError};

// =============================================================================
// Repository Error
// =============================================================================

/// Failures surfaced by an [`ItemRepository`](crate::repository::ItemRepository)
/// implementation.
///
/// The in-memory adapter never produces these; database- or HTTP-backed
/// adapters translate their native failures into these variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A query failed inside the backing store.
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Convenience type alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Engine Error
// =============================================================================

/// Unified error type returned by the use cases.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input.
    ///
    /// Field-named and surfaced verbatim so forms can highlight the
    /// offending control. Raised before any repository call, never
    /// wrapped.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced item id(s) absent from the repository.
    #[error("items not found: {}", ids.join(", "))]
    NotFound { ids: Vec<String> },

    /// A pricing domain rule was violated (currency mismatch, negative
    /// amount, >100% ratio, ...).
    #[error("business rule violated: {0}")]
    BusinessRule(CoreError),

    /// The repository/storage collaborator failed.
    #[error("infrastructure failure: {0}")]
    Infrastructure(#[from] RepositoryError),

    /// Catch-all for unexpected failures from collaborators; the original
    /// message is preserved so it can be logged, while the UI shows a
    /// generic retry prompt.
    #[error("unexpected application error: {0}")]
    Application(String),
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            // Never bury a validation failure inside a business-rule wrapper:
            // the UI needs the field name.
            CoreError::Validation(validation) => EngineError::Validation(validation),
            other => EngineError::BusinessRule(other),
        }
    }
}

impl EngineError {
    /// Wraps an unexpected collaborator failure, preserving its message.
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        EngineError::Application(err.to_string())
    }
}

/// Convenience type alias for use-case results.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
