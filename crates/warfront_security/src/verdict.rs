//! # Verdicts and Errors
//!
//! The structured `{valid, reason?}` payload every validator returns, and
//! the error channel for everything that is not a gameplay decision.

use std::fmt;
use thiserror::Error;
use warfront_core::{PlayerId, SessionId};
use warfront_store::StoreError;

/// Why an event was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Movement between position reports was impossibly fast.
    SpeedExceeded,
    /// Shots arrived faster than the weapon's cyclic rate allows.
    FireRateExceeded,
    /// Submitted damage exceeded the weapon's ceiling for that hitbox.
    InvalidDamage,
    /// Submitted hit distance exceeded the weapon's reach.
    OutOfRange,
    /// Attacker and victim share a team and friendly fire is off.
    FriendlyFireDisabled,
    /// A referenced participant is not on the session roster.
    PlayerNotInMatch,
    /// Submitted scores diverged from the kill log (soft flag).
    ScoreMismatch,
}

impl RejectReason {
    /// Stable snake_case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeedExceeded => "speed_exceeded",
            Self::FireRateExceeded => "fire_rate_exceeded",
            Self::InvalidDamage => "invalid_damage",
            Self::OutOfRange => "out_of_range",
            Self::FriendlyFireDisabled => "friendly_fire_disabled",
            Self::PlayerNotInMatch => "player_not_in_match",
            Self::ScoreMismatch => "score_mismatch",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a validation call: accepted, or rejected with a reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the event was accepted.
    pub valid: bool,
    /// Present exactly when `valid` is false.
    pub reason: Option<RejectReason>,
}

impl Verdict {
    /// An accepted event.
    #[inline]
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// A rejected event.
    #[inline]
    #[must_use]
    pub const fn reject(reason: RejectReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    /// Whether the event was accepted.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Failures that are not gameplay decisions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Caller presented no authenticated identity. Checked before
    /// anything else.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// The referenced session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The referenced player has no state in the session.
    #[error("player not found in session: {0}")]
    PlayerNotFound(PlayerId),

    /// Caller is not authorized for this mutation.
    #[error("permission denied")]
    PermissionDenied,

    /// The session already ended; its result was committed once and
    /// resubmission would double-count stats.
    #[error("session already ended: {0}")]
    SessionClosed(SessionId),

    /// Transient storage failure. Retry or surface upstream; never a
    /// rejection.
    #[error("store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ValidationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound(id) => Self::SessionNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for validator entry points.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_carries_its_reason() {
        let verdict = Verdict::reject(RejectReason::OutOfRange);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason, Some(RejectReason::OutOfRange));
        assert_eq!(verdict.reason.unwrap().as_str(), "out_of_range");
    }

    #[test]
    fn pass_has_no_reason() {
        assert_eq!(Verdict::pass().reason, None);
    }

    #[test]
    fn store_not_found_becomes_session_not_found() {
        let err: ValidationError =
            StoreError::SessionNotFound(SessionId::from("s1")).into();
        assert_eq!(err, ValidationError::SessionNotFound(SessionId::from("s1")));

        let busy: ValidationError = StoreError::Busy.into();
        assert_eq!(busy, ValidationError::Store(StoreError::Busy));
    }
}
