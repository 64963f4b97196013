//! # The Queue Pump
//!
//! The original deployment formed matches from a hidden database trigger
//! that fired on queue writes. Here the trigger is explicit: the pump
//! subscribes to store change notifications and runs one matchmaking
//! attempt per queued entry. A host binary calls [`QueuePump::run_once`]
//! in its scheduler loop; tests call [`QueuePump::drain`] and assert on
//! the sessions that came out.

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;
use warfront_core::{EntryId, MatchmakingEntry};
use warfront_matchmaking::{FormedMatch, Matchmaker};
use warfront_store::{SessionStore, StoreEvent, StoreResult};

/// Drives the matchmaker from store change notifications.
pub struct QueuePump {
    store: Arc<dyn SessionStore>,
    matchmaker: Matchmaker,
    events: Receiver<StoreEvent>,
}

impl QueuePump {
    /// Subscribes to the store. Only entries queued after this point are
    /// seen; start the pump before opening the queue to clients.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, matchmaker: Matchmaker) -> Self {
        let events = store.subscribe();
        Self {
            store,
            matchmaker,
            events,
        }
    }

    /// Waits up to `timeout` for one event and handles it.
    ///
    /// Returns the match formed by that event, if any. Timing out is a
    /// quiet queue, not an error.
    ///
    /// # Errors
    ///
    /// Propagates transient store failures from the matchmaking attempt.
    pub fn run_once(
        &self,
        timeout: Duration,
        now_ms: u64,
    ) -> StoreResult<Option<FormedMatch>> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => self.handle(&event, now_ms),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    /// Handles every already-pending event without blocking.
    ///
    /// # Errors
    ///
    /// Propagates transient store failures from the matchmaking attempts.
    pub fn drain(&self, now_ms: u64) -> StoreResult<Vec<FormedMatch>> {
        let mut formed = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let Some(m) = self.handle(&event, now_ms)? {
                formed.push(m);
            }
        }
        Ok(formed)
    }

    fn handle(&self, event: &StoreEvent, now_ms: u64) -> StoreResult<Option<FormedMatch>> {
        let StoreEvent::EntryQueued(id) = event else {
            return Ok(None);
        };
        let Some(entry) = self.find_entry(id)? else {
            // Withdrawn or already matched; stale notifications are normal.
            return Ok(None);
        };
        self.matchmaker.try_match(&entry, now_ms)
    }

    fn find_entry(&self, id: &EntryId) -> StoreResult<Option<MatchmakingEntry>> {
        let queue = self.store.queue_snapshot()?;
        Ok(queue.into_iter().find(|e| &e.id == id))
    }
}
