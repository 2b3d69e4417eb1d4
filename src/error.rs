//! Typed errors for the matchmaking library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Store-level failures and
//! matchmaking business failures are separate enums so callers can
//! distinguish "retry this" from "re-select and try again".

use thiserror::Error;

/// Errors surfaced by a [`DocumentStore`](crate::traits::store::DocumentStore)
/// implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced document does not exist (update/delete target)
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Backend unreachable or failed mid-operation
    #[error("store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Atomic batch rejected: a precondition no longer held at commit time
    #[error("batch write conflict: {reason}")]
    Conflict { reason: String },

    /// Document field could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`].
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Shorthand for [`StoreError::Conflict`].
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during matchmaking operations.
///
/// Per-candidate failures during candidate generation never surface here:
/// they degrade that one candidate to "excluded" and the run continues.
/// Only failures on the subject user's own record, or on the pairing
/// commit, reach the caller.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The subject user's record is missing; fatal for the operation
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// A pairing participant was already paired when the commit ran
    #[error("user already paired: {user_id}")]
    AlreadyPaired { user_id: String },

    /// Attempted to pair a user with themselves
    #[error("cannot pair a user with themselves: {user_id}")]
    SelfPairing { user_id: String },

    /// The pairing batch was rejected by the store for a reason other than
    /// a lost pairing race; safe to retry
    #[error("pairing transaction aborted")]
    TransactionAborted,

    /// Caller cancelled the run before the persist step
    #[error("operation cancelled")]
    Cancelled,

    /// Storage operation on the subject's own record failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl MatchError {
    /// Shorthand for [`MatchError::UserNotFound`].
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    /// Shorthand for [`MatchError::AlreadyPaired`].
    pub fn already_paired(user_id: impl Into<String>) -> Self {
        Self::AlreadyPaired {
            user_id: user_id.into(),
        }
    }

    /// Whether retrying the same call can succeed without re-selection.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TransactionAborted | Self::Store(StoreError::Unavailable(_))
        )
    }
}

/// Result type alias for matchmaking operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
