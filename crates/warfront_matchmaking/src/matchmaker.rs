//! # The Matchmaker
//!
//! Scan, rank, claim, form. Claiming uses the store's atomic
//! remove-if-present so two racing scans can never assign the same waiting
//! player to two sessions; if the pool drains below quota mid-claim,
//! everything claimed is put back.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use warfront_arsenal::{mode_settings, Tolerances};
use warfront_core::{
    EntryId, MatchmakingEntry, PlayerId, SessionId, SessionRecord, Team,
};
use warfront_store::{SessionStore, StoreResult};

/// A successfully formed session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormedMatch {
    /// The created session.
    pub session_id: SessionId,
    /// Alpha roster.
    pub alpha: Vec<PlayerId>,
    /// Bravo roster.
    pub bravo: Vec<PlayerId>,
}

/// Pairs queue entries into sessions.
pub struct Matchmaker {
    store: Arc<dyn SessionStore>,
    tolerances: Tolerances,
    rng: Mutex<StdRng>,
}

impl Matchmaker {
    /// Creates a matchmaker with an entropy-seeded shuffle.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, tolerances: Tolerances) -> Self {
        Self::with_rng(store, tolerances, StdRng::from_entropy())
    }

    /// Creates a matchmaker with an explicit RNG (deterministic tests).
    #[must_use]
    pub fn with_rng(store: Arc<dyn SessionStore>, tolerances: Tolerances, rng: StdRng) -> Self {
        Self {
            store,
            tolerances,
            rng: Mutex::new(rng),
        }
    }

    /// Attempts to form a session around a newly queued entry.
    ///
    /// Returns `Ok(None)` when the queue cannot meet the mode's quota yet;
    /// the entry stays queued for a later attempt.
    ///
    /// # Errors
    ///
    /// Propagates transient store failures; nothing is claimed when the
    /// initial scan fails, and a failed claim sequence is rolled back.
    pub fn try_match(
        &self,
        entry: &MatchmakingEntry,
        now_ms: u64,
    ) -> StoreResult<Option<FormedMatch>> {
        let queue = self.store.queue_snapshot()?;

        // Compatible candidates: same mode, close rating, playable ping.
        let mut candidates: Vec<&MatchmakingEntry> = queue
            .iter()
            .filter(|c| {
                c.id != entry.id
                    && c.mode == entry.mode
                    && c.rating_gap(entry.rating) < self.tolerances.queue_rating_gap
                    && c.ping_ms < self.tolerances.queue_max_ping_ms
            })
            .collect();

        // Lower combined score is a better match; the sort is stable, so
        // equal scores keep arrival order.
        candidates.sort_by_key(|c| c.rating_gap(entry.rating) + c.ping_ms);

        let required = entry.mode.required_players();
        if candidates.len() < required - 1 {
            tracing::debug!(mode = %entry.mode, waiting = candidates.len(),
                required, "not enough compatible players yet");
            return Ok(None);
        }

        // Claim phase. The requester's own entry goes first: if it already
        // vanished (withdrawn or matched by a racing scan), stand down.
        let mut claimed: Vec<MatchmakingEntry> = Vec::with_capacity(required);
        match self.store.remove_entry(&entry.id)? {
            Some(own) => claimed.push(own),
            None => return Ok(None),
        }

        for candidate in candidates {
            if claimed.len() == required {
                break;
            }
            // A vanished candidate is skipped; the next ranked one steps up.
            if let Some(taken) = self.store.remove_entry(&candidate.id)? {
                claimed.push(taken);
            }
        }

        if claimed.len() < required {
            // The pool drained under us. Put everyone back and wait.
            self.rollback(claimed);
            return Ok(None);
        }

        self.form_session(entry, claimed, now_ms).map(Some)
    }

    /// Withdraws an entry on behalf of its owner (cancellation or
    /// client-side wait timeout). Returns whether it was still queued.
    ///
    /// # Errors
    ///
    /// Propagates transient store failures.
    pub fn withdraw(&self, id: &EntryId) -> StoreResult<bool> {
        Ok(self.store.remove_entry(id)?.is_some())
    }

    /// Sweeps entries that outlived the queue wait timeout. Returns the
    /// ids removed; entries that vanish mid-sweep are simply skipped.
    ///
    /// # Errors
    ///
    /// Propagates transient store failures.
    pub fn purge_expired(&self, now_ms: u64) -> StoreResult<Vec<EntryId>> {
        let queue = self.store.queue_snapshot()?;
        let mut removed = Vec::new();
        for entry in queue {
            if entry.expired(now_ms, self.tolerances.queue_timeout_ms)
                && self.store.remove_entry(&entry.id)?.is_some()
            {
                tracing::debug!(entry = %entry.id, player = %entry.player, "queue entry expired");
                removed.push(entry.id);
            }
        }
        Ok(removed)
    }

    /// Returns claimed entries to the queue. Best effort: a failure here
    /// is logged, the entries it could not restore are lost to the
    /// client-side timeout path.
    fn rollback(&self, claimed: Vec<MatchmakingEntry>) {
        for entry in claimed {
            let id = entry.id.clone();
            if let Err(err) = self.store.enqueue(entry) {
                tracing::warn!(entry = %id, error = %err, "failed to restore queue entry");
            }
        }
    }

    fn form_session(
        &self,
        requester: &MatchmakingEntry,
        claimed: Vec<MatchmakingEntry>,
        now_ms: u64,
    ) -> StoreResult<FormedMatch> {
        let mode = requester.mode;
        let mut roster: Vec<PlayerId> = claimed.iter().map(|e| e.player.clone()).collect();

        let session_id = {
            let mut rng = self.rng.lock();
            roster.shuffle(&mut *rng);
            SessionId::new(format!("match-{:016x}", rng.gen::<u64>()))
        };

        // Alpha takes the first half of the shuffled roster, bravo the
        // rest. Randomized, not skill-balanced.
        let mid = (roster.len() + 1) / 2;
        let alpha: Vec<PlayerId> = roster[..mid].to_vec();
        let bravo: Vec<PlayerId> = roster[mid..].to_vec();

        let mut record = SessionRecord::new(
            session_id.clone(),
            requester.player.clone(),
            mode,
            mode_settings(mode),
            now_ms,
        );
        for player in &alpha {
            record.insert_player(player.clone(), Team::Alpha);
        }
        for player in &bravo {
            record.insert_player(player.clone(), Team::Bravo);
        }

        if let Err(err) = self.store.create_session(record) {
            // Claimed players go back to the queue rather than vanishing.
            self.rollback(claimed);
            return Err(err);
        }

        tracing::info!(session = %session_id, mode = %mode,
            players = alpha.len() + bravo.len(), "session formed");
        Ok(FormedMatch {
            session_id,
            alpha,
            bravo,
        })
    }
}
