//! # Suspicious Activity Records
//!
//! Append-only audit trail behind every anti-cheat rejection. Consumed by
//! an out-of-scope review tool; nothing in the validation path ever reads
//! these back.

use crate::ids::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a player was flagged for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Moved faster than physics allows.
    SpeedHack,
    /// Submitted damage above the weapon's ceiling.
    DamageTooHigh,
    /// Submitted a hit beyond the weapon's reach.
    RangeTooHigh,
    /// Fired faster than the weapon's cyclic rate.
    FireRateExceeded,
    /// Submitted scores diverged from the kill log.
    ScoreMismatch,
}

impl ViolationKind {
    /// Stable snake_case name used in stored records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeedHack => "speed_hack",
            Self::DamageTooHigh => "damage_too_high",
            Self::RangeTooHigh => "range_too_high",
            Self::FireRateExceeded => "fire_rate_exceeded",
            Self::ScoreMismatch => "score_mismatch",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flagged event, with the offending values rendered into `detail`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousActivity {
    /// The player being flagged.
    pub player: PlayerId,
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable offending values (e.g. `speed=42.0 max=15.0`).
    pub detail: String,
    /// When the event happened (ms since the Unix epoch).
    pub timestamp_ms: u64,
}

impl SuspiciousActivity {
    /// Creates a record.
    #[must_use]
    pub fn new(
        player: PlayerId,
        kind: ViolationKind,
        detail: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            player,
            kind,
            detail: detail.into(),
            timestamp_ms,
        }
    }
}
