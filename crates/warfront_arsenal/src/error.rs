//! # Arsenal Error Types

use thiserror::Error;

/// Errors raised while loading balance data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArsenalError {
    /// A TOML table failed to parse or failed a sanity check.
    #[error("invalid balance config: {0}")]
    InvalidConfig(String),

    /// A weapon profile carried a non-positive fire rate.
    #[error("weapon {weapon_id} has non-positive fire rate")]
    BadFireRate {
        /// The offending weapon id.
        weapon_id: String,
    },
}

/// Result type for arsenal operations.
pub type ArsenalResult<T> = Result<T, ArsenalError>;
