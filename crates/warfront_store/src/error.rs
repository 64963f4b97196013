//! # Store Error Types

use thiserror::Error;
use warfront_core::SessionId;

/// Errors surfaced by a session store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced session does not exist (or has been archived).
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// A bounded lock wait expired. Transient: retry or surface upstream,
    /// never report as a validation rejection.
    #[error("store busy, try again")]
    Busy,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
