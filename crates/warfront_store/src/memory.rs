//! # In-Memory Session Store
//!
//! Reference [`SessionStore`] implementation backing tests and single-node
//! deployments. Locks are `parking_lot` reader-writer locks acquired with a
//! bounded wait; an expired wait surfaces as [`StoreError::Busy`] instead
//! of stalling a validation call.

use crate::error::{StoreError, StoreResult};
use crate::store::{MatchResult, SessionStore, StoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use warfront_core::{
    EntryId, KillEntry, MatchmakingEntry, PlayerId, PlayerStats, SessionId, SessionRecord,
    SessionStatus, StatDelta, SuspiciousActivity,
};

/// Default bound on lock waits.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(250);

/// In-memory store. Cheap to clone state out of, safe to share behind an
/// `Arc`.
pub struct MemoryStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
    /// Arrival order is load-bearing: matchmaking tie-breaks are stable.
    queue: RwLock<Vec<MatchmakingEntry>>,
    suspicious: RwLock<Vec<SuspiciousActivity>>,
    results: RwLock<Vec<MatchResult>>,
    stats: RwLock<HashMap<PlayerId, PlayerStats>>,
    subscribers: RwLock<Vec<Sender<StoreEvent>>>,
    lock_timeout: Duration,
}

impl MemoryStore {
    /// Creates an empty store with the default lock wait budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Creates an empty store with an explicit lock wait budget.
    #[must_use]
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            queue: RwLock::new(Vec::new()),
            suspicious: RwLock::new(Vec::new()),
            results: RwLock::new(Vec::new()),
            stats: RwLock::new(HashMap::new()),
            subscribers: RwLock::new(Vec::new()),
            lock_timeout,
        }
    }

    /// Sends an event to every live subscriber, pruning dead ones.
    fn publish(&self, event: &StoreEvent) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn session(&self, id: &SessionId) -> StoreResult<SessionRecord> {
        let sessions = self
            .sessions
            .try_read_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(id.clone()))
    }

    fn create_session(&self, record: SessionRecord) -> StoreResult<()> {
        let id = record.id.clone();
        {
            let mut sessions = self
                .sessions
                .try_write_for(self.lock_timeout)
                .ok_or(StoreError::Busy)?;
            sessions.insert(id.clone(), record);
        }
        self.publish(&StoreEvent::SessionCreated(id));
        Ok(())
    }

    fn update_session(
        &self,
        id: &SessionId,
        apply: &mut dyn FnMut(&mut SessionRecord),
    ) -> StoreResult<()> {
        let mut sessions = self
            .sessions
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        let record = sessions
            .get_mut(id)
            .ok_or_else(|| StoreError::SessionNotFound(id.clone()))?;
        apply(record);
        Ok(())
    }

    fn append_kill(&self, id: &SessionId, entry: KillEntry) -> StoreResult<()> {
        self.update_session(id, &mut |record| record.kill_log.push(entry.clone()))
    }

    fn flag_for_review(&self, id: &SessionId, reason: &str) -> StoreResult<()> {
        self.update_session(id, &mut |record| {
            record.flagged_for_review = Some(reason.to_owned());
        })
    }

    fn log_suspicious(&self, activity: SuspiciousActivity) -> StoreResult<()> {
        let mut log = self
            .suspicious
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        log.push(activity);
        Ok(())
    }

    fn suspicious_activity(&self) -> StoreResult<Vec<SuspiciousActivity>> {
        let log = self
            .suspicious
            .try_read_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        Ok(log.clone())
    }

    fn enqueue(&self, entry: MatchmakingEntry) -> StoreResult<()> {
        let id = entry.id.clone();
        {
            let mut queue = self
                .queue
                .try_write_for(self.lock_timeout)
                .ok_or(StoreError::Busy)?;
            queue.push(entry);
        }
        self.publish(&StoreEvent::EntryQueued(id));
        Ok(())
    }

    fn queue_snapshot(&self) -> StoreResult<Vec<MatchmakingEntry>> {
        let queue = self
            .queue
            .try_read_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        Ok(queue.clone())
    }

    fn remove_entry(&self, id: &EntryId) -> StoreResult<Option<MatchmakingEntry>> {
        let mut queue = self
            .queue
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        let position = queue.iter().position(|entry| &entry.id == id);
        Ok(position.map(|index| queue.remove(index)))
    }

    fn commit_match_result(
        &self,
        result: MatchResult,
        stats: &HashMap<PlayerId, StatDelta>,
    ) -> StoreResult<()> {
        let session_id = result.session_id.clone();

        // All locks taken up front: the batch either fully applies or, if
        // any wait expires, nothing has been written yet.
        let mut sessions = self
            .sessions
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        let mut results = self
            .results
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        let mut lifetime = self
            .stats
            .try_write_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;

        let record = sessions
            .get_mut(&session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.clone()))?;
        record.advance_status(SessionStatus::Ended);

        results.push(result);
        for (player, delta) in stats {
            lifetime.entry(player.clone()).or_default().apply(delta);
        }

        drop((sessions, results, lifetime));
        self.publish(&StoreEvent::SessionEnded(session_id));
        Ok(())
    }

    fn player_stats(&self, id: &PlayerId) -> StoreResult<Option<PlayerStats>> {
        let stats = self
            .stats
            .try_read_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        Ok(stats.get(id).copied())
    }

    fn match_results(&self) -> StoreResult<Vec<MatchResult>> {
        let results = self
            .results
            .try_read_for(self.lock_timeout)
            .ok_or(StoreError::Busy)?;
        Ok(results.clone())
    }

    fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warfront_core::{GameMode, Position, SessionSettings, SubmittedResults, Team, TeamScores};

    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn session(id: &str) -> SessionRecord {
        let mut record = SessionRecord::new(
            SessionId::from(id),
            PlayerId::from("host"),
            GameMode::Duel,
            SessionSettings {
                friendly_fire: false,
                score_limit: 10,
                time_limit_secs: 600,
            },
            0,
        );
        record.insert_player(PlayerId::from("host"), Team::Alpha);
        record.insert_player(PlayerId::from("guest"), Team::Bravo);
        record
    }

    fn entry(id: &str) -> MatchmakingEntry {
        MatchmakingEntry {
            id: EntryId::from(id),
            player: PlayerId::from(id),
            squad: None,
            rating: 1000,
            mode: GameMode::Duel,
            ping_ms: 30,
            enqueued_at_ms: 0,
        }
    }

    #[test]
    fn expired_lock_wait_is_busy() {
        let store = MemoryStore::with_lock_timeout(Duration::from_millis(5));
        store.create_session(session("s1")).unwrap();

        // Hold the write side so every bounded wait expires.
        let _sessions = store.sessions.write();

        assert_eq!(
            store.session(&SessionId::from("s1")).unwrap_err(),
            StoreError::Busy
        );
        assert_eq!(
            store
                .update_session(&SessionId::from("s1"), &mut |_| {})
                .unwrap_err(),
            StoreError::Busy
        );
    }

    #[test]
    fn missing_session_is_not_found() {
        let err = store().session(&SessionId::from("nope")).unwrap_err();
        assert_eq!(err, StoreError::SessionNotFound(SessionId::from("nope")));
    }

    #[test]
    fn update_runs_under_the_write_section() {
        let store = store();
        store.create_session(session("s1")).unwrap();

        store
            .update_session(&SessionId::from("s1"), &mut |record| {
                if let Some(state) = record.player_mut(&PlayerId::from("host")) {
                    state.record_position(Position::new(1.0, 0.0, 0.0), 500);
                }
            })
            .unwrap();

        let record = store.session(&SessionId::from("s1")).unwrap();
        let sample = record
            .player(&PlayerId::from("host"))
            .unwrap()
            .last_position
            .unwrap();
        assert_eq!(sample.timestamp_ms, 500);
    }

    #[test]
    fn remove_entry_yields_each_entry_exactly_once() {
        let store = store();
        store.enqueue(entry("q1")).unwrap();

        let first = store.remove_entry(&EntryId::from("q1")).unwrap();
        let second = store.remove_entry(&EntryId::from("q1")).unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(store.queue_snapshot().unwrap().is_empty());
    }

    #[test]
    fn queue_preserves_arrival_order() {
        let store = store();
        for id in ["a", "b", "c"] {
            store.enqueue(entry(id)).unwrap();
        }
        let ids: Vec<_> = store
            .queue_snapshot()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a".into(), "b".into(), "c".into()]);
    }

    #[test]
    fn subscribers_see_queue_and_session_events() {
        let store = store();
        let rx = store.subscribe();

        store.enqueue(entry("q1")).unwrap();
        store.create_session(session("s1")).unwrap();

        assert_eq!(rx.recv().unwrap(), StoreEvent::EntryQueued(EntryId::from("q1")));
        assert_eq!(
            rx.recv().unwrap(),
            StoreEvent::SessionCreated(SessionId::from("s1"))
        );
    }

    #[test]
    fn commit_applies_result_and_stats_together() {
        let store = store();
        store.create_session(session("s1")).unwrap();
        let rx = store.subscribe();

        let mut stats = HashMap::new();
        stats.insert(
            PlayerId::from("host"),
            StatDelta {
                kills: 10,
                deaths: 2,
                assists: 1,
            },
        );

        store
            .commit_match_result(
                MatchResult {
                    session_id: SessionId::from("s1"),
                    submitted: SubmittedResults {
                        scores: TeamScores { alpha: 10, bravo: 8 },
                        player_stats: HashMap::new(),
                    },
                    reconstructed: TeamScores { alpha: 10, bravo: 8 },
                    flagged: false,
                    validated_at_ms: 1,
                },
                &stats,
            )
            .unwrap();

        let lifetime = store.player_stats(&PlayerId::from("host")).unwrap().unwrap();
        assert_eq!(lifetime.kills, 10);
        assert_eq!(lifetime.matches_played, 1);
        assert_eq!(store.match_results().unwrap().len(), 1);
        assert_eq!(
            store.session(&SessionId::from("s1")).unwrap().status,
            SessionStatus::Ended
        );
        assert_eq!(
            rx.recv().unwrap(),
            StoreEvent::SessionEnded(SessionId::from("s1"))
        );
    }

    #[test]
    fn commit_against_missing_session_writes_nothing() {
        let store = store();
        let result = MatchResult {
            session_id: SessionId::from("ghost"),
            submitted: SubmittedResults {
                scores: TeamScores::default(),
                player_stats: HashMap::new(),
            },
            reconstructed: TeamScores::default(),
            flagged: false,
            validated_at_ms: 0,
        };

        let mut stats = HashMap::new();
        stats.insert(PlayerId::from("host"), StatDelta::default());

        let err = store.commit_match_result(result, &stats).unwrap_err();
        assert_eq!(err, StoreError::SessionNotFound(SessionId::from("ghost")));
        assert!(store.match_results().unwrap().is_empty());
        assert!(store.player_stats(&PlayerId::from("host")).unwrap().is_none());
    }
}
