//! # The SessionStore Contract
//!
//! Everything the validation core needs from its backing store, as an
//! object-safe trait. The contract deliberately mirrors the primitives a
//! managed realtime database offers (keyed reads, conditional updates,
//! append-to-log, remove-if-present, change feeds) without naming one.

use crate::error::StoreResult;
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warfront_core::{
    EntryId, KillEntry, MatchmakingEntry, PlayerId, PlayerStats, SessionId, SessionRecord,
    StatDelta, SubmittedResults, SuspiciousActivity, TeamScores,
};

/// A validated match outcome as persisted for the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The session the result belongs to.
    pub session_id: SessionId,
    /// What the host submitted.
    pub submitted: SubmittedResults,
    /// Scores reconstructed from the kill log.
    pub reconstructed: TeamScores,
    /// Whether verification flagged a discrepancy for manual review.
    pub flagged: bool,
    /// When validation ran (ms since the Unix epoch).
    pub validated_at_ms: u64,
}

/// Change notifications a store publishes to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A new matchmaking entry appeared.
    EntryQueued(EntryId),
    /// A session record was created.
    SessionCreated(SessionId),
    /// A session's result was committed and the session ended.
    SessionEnded(SessionId),
}

/// Abstract session store.
///
/// All methods are synchronous and bounded: an implementation must give up
/// within its configured wait budget and return [`crate::StoreError::Busy`]
/// rather than hang a validation call.
pub trait SessionStore: Send + Sync {
    /// Reads a session record.
    fn session(&self, id: &SessionId) -> StoreResult<SessionRecord>;

    /// Creates a session record and publishes
    /// [`StoreEvent::SessionCreated`].
    fn create_session(&self, record: SessionRecord) -> StoreResult<()>;

    /// Runs `apply` against the session under the store's write critical
    /// section.
    ///
    /// This is the conditional-update primitive: a validator performs its
    /// checks and its state advancement inside one closure, so an accepted
    /// event updates state exactly once and a rejected event writes
    /// nothing.
    fn update_session(
        &self,
        id: &SessionId,
        apply: &mut dyn FnMut(&mut SessionRecord),
    ) -> StoreResult<()>;

    /// Appends to the session's kill log.
    fn append_kill(&self, id: &SessionId, entry: KillEntry) -> StoreResult<()>;

    /// Marks a session for out-of-band manual review.
    fn flag_for_review(&self, id: &SessionId, reason: &str) -> StoreResult<()>;

    /// Appends a suspicious-activity record. Append-only.
    fn log_suspicious(&self, activity: SuspiciousActivity) -> StoreResult<()>;

    /// Full suspicious-activity log, for the review tool.
    fn suspicious_activity(&self) -> StoreResult<Vec<SuspiciousActivity>>;

    /// Adds a matchmaking entry and publishes [`StoreEvent::EntryQueued`].
    fn enqueue(&self, entry: MatchmakingEntry) -> StoreResult<()>;

    /// Current queue contents in arrival order.
    fn queue_snapshot(&self) -> StoreResult<Vec<MatchmakingEntry>>;

    /// Atomically removes a queue entry if it is still present.
    ///
    /// `None` means the entry vanished first (matched elsewhere or
    /// withdrawn by its owner); callers treat that as a fact of life, not
    /// an error.
    fn remove_entry(&self, id: &EntryId) -> StoreResult<Option<MatchmakingEntry>>;

    /// Persists a match result and applies per-player stat increments as
    /// one all-or-nothing batch, ends the session, and publishes
    /// [`StoreEvent::SessionEnded`].
    fn commit_match_result(
        &self,
        result: MatchResult,
        stats: &HashMap<PlayerId, StatDelta>,
    ) -> StoreResult<()>;

    /// Lifetime stats for a player, if any matches were recorded.
    fn player_stats(&self, id: &PlayerId) -> StoreResult<Option<PlayerStats>>;

    /// All committed match results, for the review tool.
    fn match_results(&self) -> StoreResult<Vec<MatchResult>>;

    /// Subscribes to change notifications.
    fn subscribe(&self) -> Receiver<StoreEvent>;
}
