//! # Anti-Cheat Tolerances
//!
//! Every threshold the validators apply, in one configurable structure.
//! The defaults are the values the live game shipped with. None of them is
//! load-bearing beyond "some slack for network jitter"; tune them from
//! config, not by editing call sites.

use serde::{Deserialize, Serialize};

/// Thresholds and slack factors for the validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Maximum plausible movement speed in units per second
    /// (sprint plus ability headroom).
    pub max_speed: f32,
    /// Minimum elapsed time used in the speed computation, in
    /// milliseconds. Guards the division when two reports share a
    /// timestamp.
    pub speed_epsilon_ms: u64,
    /// Fraction of the weapon's minimum shot interval that must have
    /// elapsed. Below 1.0 to absorb network jitter.
    pub fire_interval_slack: f64,
    /// Submitted damage may exceed the computed ceiling by this factor
    /// (client and server damage formulas round differently).
    pub damage_headroom: f32,
    /// Submitted distance may exceed the weapon's range by this factor.
    pub range_headroom: f32,
    /// Reconstructed-vs-submitted score gap tolerated before a session is
    /// flagged for review.
    pub score_mismatch_limit: u32,
    /// Matchmaking: maximum rating gap between queued players.
    pub queue_rating_gap: u32,
    /// Matchmaking: maximum acceptable ping in milliseconds.
    pub queue_max_ping_ms: u32,
    /// Matchmaking: how long an entry may wait before the client gives up.
    pub queue_timeout_ms: u64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            max_speed: 15.0,
            speed_epsilon_ms: 1,
            fire_interval_slack: 0.9,
            damage_headroom: 1.1,
            range_headroom: 1.2,
            score_mismatch_limit: 2,
            queue_rating_gap: 200,
            queue_max_ping_ms: 100,
            queue_timeout_ms: 60_000,
        }
    }
}
