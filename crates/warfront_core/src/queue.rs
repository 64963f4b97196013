//! # Matchmaking Queue Entries
//!
//! A queue entry exists from enqueue until it is matched, withdrawn by its
//! owner, or swept after the client-side wait timeout.

use crate::ids::{EntryId, PlayerId};
use crate::mode::GameMode;
use serde::{Deserialize, Serialize};

/// One waiting player in the matchmaking queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchmakingEntry {
    /// Queue key for this entry.
    pub id: EntryId,
    /// The waiting player.
    pub player: PlayerId,
    /// Premade squad, if the player queued with one.
    pub squad: Option<String>,
    /// Skill rating at enqueue time.
    pub rating: i32,
    /// Requested game mode.
    pub mode: GameMode,
    /// Measured latency to the region in milliseconds.
    pub ping_ms: u32,
    /// When the entry was created (ms since the Unix epoch).
    pub enqueued_at_ms: u64,
}

impl MatchmakingEntry {
    /// Absolute rating gap to another player's rating.
    #[inline]
    #[must_use]
    pub const fn rating_gap(&self, other_rating: i32) -> u32 {
        self.rating.abs_diff(other_rating)
    }

    /// Whether this entry has outlived the queue wait timeout.
    #[inline]
    #[must_use]
    pub const fn expired(&self, now_ms: u64, timeout_ms: u64) -> bool {
        now_ms.saturating_sub(self.enqueued_at_ms) >= timeout_ms
    }
}
