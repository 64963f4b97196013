//! # Match Result Verification
//!
//! The host submits final scores; we rebuild them from the kill log and
//! compare. Trust but verify: a discrepancy flags the session for manual
//! review, it never blocks persistence. Results and per-player stat
//! increments land in one batched commit.

use crate::verdict::{ValidationError, ValidationResult};
use std::sync::Arc;
use warfront_arsenal::Tolerances;
use warfront_core::{
    KillEntry, PlayerId, SessionId, SessionStatus, SubmittedResults, SuspiciousActivity,
    TeamScores, ViolationKind,
};
use warfront_store::{MatchResult, SessionStore};

/// Outcome of result validation. `success` is always true when this is
/// returned; a discrepancy shows up as `flagged`, not as failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The result was persisted.
    pub success: bool,
    /// Verification found a score discrepancy; review happens out-of-band.
    pub flagged: bool,
    /// Scores replayed from the kill log.
    pub reconstructed: TeamScores,
}

/// Validates and persists submitted match results.
pub struct MatchResultValidator {
    store: Arc<dyn SessionStore>,
    tolerances: Tolerances,
}

impl MatchResultValidator {
    /// Creates a validator over a store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, tolerances: Tolerances) -> Self {
        Self { store, tolerances }
    }

    /// Validates a submitted result, flags discrepancies, and commits the
    /// result plus stat increments as one batch.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PermissionDenied`] unless the submitter is the
    /// session host; [`ValidationError::SessionClosed`] when the session
    /// already ended (the commit is once-only, a resubmission would
    /// double-count lifetime stats); [`ValidationError::SessionNotFound`] /
    /// [`ValidationError::Store`] from storage.
    pub fn validate_match_result(
        &self,
        session_id: &SessionId,
        submitted: &SubmittedResults,
        submitter: &PlayerId,
        now_ms: u64,
    ) -> ValidationResult<MatchOutcome> {
        let record = self.store.session(session_id)?;

        if &record.host != submitter {
            tracing::warn!(session = %session_id, submitter = %submitter,
                "non-host attempted to submit results");
            return Err(ValidationError::PermissionDenied);
        }

        if record.status == SessionStatus::Ended {
            tracing::warn!(session = %session_id, "result resubmission for ended session");
            return Err(ValidationError::SessionClosed(session_id.clone()));
        }

        let reconstructed = replay_scores(&record.kill_log);
        let alpha_gap = reconstructed.alpha.abs_diff(submitted.scores.alpha);
        let bravo_gap = reconstructed.bravo.abs_diff(submitted.scores.bravo);
        let flagged = alpha_gap > self.tolerances.score_mismatch_limit
            || bravo_gap > self.tolerances.score_mismatch_limit;

        if flagged {
            // Soft flag: reviewed out-of-band, never blocks persistence.
            let detail = format!(
                "submitted {}:{} reconstructed {}:{}",
                submitted.scores.alpha,
                submitted.scores.bravo,
                reconstructed.alpha,
                reconstructed.bravo
            );
            tracing::warn!(session = %session_id, detail, "score mismatch");
            if let Err(err) = self
                .store
                .flag_for_review(session_id, ViolationKind::ScoreMismatch.as_str())
            {
                tracing::warn!(session = %session_id, error = %err, "failed to flag session");
            }
            let activity = SuspiciousActivity::new(
                record.host.clone(),
                ViolationKind::ScoreMismatch,
                detail,
                now_ms,
            );
            if let Err(err) = self.store.log_suspicious(activity) {
                tracing::warn!(session = %session_id, error = %err,
                    "failed to record suspicious activity");
            }
        }

        self.store.commit_match_result(
            MatchResult {
                session_id: session_id.clone(),
                submitted: submitted.clone(),
                reconstructed,
                flagged,
                validated_at_ms: now_ms,
            },
            &submitted.player_stats,
        )?;

        tracing::info!(session = %session_id, flagged, "match result committed");
        Ok(MatchOutcome {
            success: true,
            flagged,
            reconstructed,
        })
    }
}

/// Replays the kill log into authoritative team scores: one point per
/// enemy kill, nothing for team kills.
#[must_use]
pub fn replay_scores(kill_log: &[KillEntry]) -> TeamScores {
    let mut scores = TeamScores::default();
    for entry in kill_log {
        if !entry.team_kill {
            scores.add(entry.killer_team, 1);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use warfront_arsenal::mode_settings;
    use warfront_core::{GameMode, SessionRecord, SessionStatus, StatDelta, Team, WeaponId};
    use warfront_store::MemoryStore;

    fn kill(killer: &str, victim: &str, team: Team, team_kill: bool, at: u64) -> KillEntry {
        KillEntry {
            killer: PlayerId::from(killer),
            victim: PlayerId::from(victim),
            killer_team: team,
            team_kill,
            weapon: WeaponId::from("ar_standard"),
            timestamp_ms: at,
        }
    }

    fn fixture(alpha_kills: u32, bravo_kills: u32) -> (Arc<MemoryStore>, MatchResultValidator, SessionId) {
        let store = Arc::new(MemoryStore::new());
        let session_id = SessionId::from("s1");

        let mut record = SessionRecord::new(
            session_id.clone(),
            PlayerId::from("host"),
            GameMode::Team,
            mode_settings(GameMode::Team),
            0,
        );
        record.insert_player(PlayerId::from("host"), Team::Alpha);
        record.insert_player(PlayerId::from("rival"), Team::Bravo);
        for i in 0..alpha_kills {
            record.kill_log.push(kill("host", "rival", Team::Alpha, false, u64::from(i)));
        }
        for i in 0..bravo_kills {
            record.kill_log.push(kill("rival", "host", Team::Bravo, false, u64::from(i)));
        }
        store.create_session(record).unwrap();

        let validator = MatchResultValidator::new(store.clone(), Tolerances::default());
        (store, validator, session_id)
    }

    fn submitted(alpha: u32, bravo: u32) -> SubmittedResults {
        let mut player_stats = HashMap::new();
        player_stats.insert(
            PlayerId::from("host"),
            StatDelta {
                kills: alpha,
                deaths: bravo,
                assists: 0,
            },
        );
        SubmittedResults {
            scores: TeamScores { alpha, bravo },
            player_stats,
        }
    }

    #[test]
    fn replay_skips_team_kills() {
        let log = vec![
            kill("a", "b", Team::Alpha, false, 0),
            kill("a", "c", Team::Alpha, true, 1),
            kill("d", "a", Team::Bravo, false, 2),
        ];
        let scores = replay_scores(&log);
        assert_eq!(scores, TeamScores { alpha: 1, bravo: 1 });
    }

    #[test]
    fn matching_scores_commit_without_flag() {
        let (store, validator, session) = fixture(10, 8);
        let outcome = validator
            .validate_match_result(&session, &submitted(10, 8), &PlayerId::from("host"), 1_000)
            .unwrap();

        assert!(outcome.success);
        assert!(!outcome.flagged);
        assert_eq!(outcome.reconstructed, TeamScores { alpha: 10, bravo: 8 });

        let results = store.match_results().unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].flagged);
        assert!(store.session(&session).unwrap().flagged_for_review.is_none());
    }

    #[test]
    fn mismatch_is_flagged_but_still_persisted() {
        // Kill log says 10:8, host claims 10:11. Gap of 3 > tolerance 2.
        let (store, validator, session) = fixture(10, 8);
        let outcome = validator
            .validate_match_result(&session, &submitted(10, 11), &PlayerId::from("host"), 1_000)
            .unwrap();

        assert!(outcome.success);
        assert!(outcome.flagged);

        let results = store.match_results().unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].flagged);
        assert_eq!(
            store.session(&session).unwrap().flagged_for_review.as_deref(),
            Some("score_mismatch")
        );
        assert_eq!(
            store.suspicious_activity().unwrap()[0].kind,
            ViolationKind::ScoreMismatch
        );
    }

    #[test]
    fn gap_within_tolerance_is_not_flagged() {
        let (_, validator, session) = fixture(10, 8);
        let outcome = validator
            .validate_match_result(&session, &submitted(10, 10), &PlayerId::from("host"), 1_000)
            .unwrap();
        assert!(!outcome.flagged);
    }

    #[test]
    fn only_the_host_may_submit() {
        let (store, validator, session) = fixture(5, 5);
        let err = validator
            .validate_match_result(&session, &submitted(5, 5), &PlayerId::from("rival"), 1_000)
            .unwrap_err();

        assert_eq!(err, ValidationError::PermissionDenied);
        assert!(store.match_results().unwrap().is_empty());
    }

    #[test]
    fn resubmission_after_end_is_rejected() {
        let (store, validator, session) = fixture(4, 2);
        validator
            .validate_match_result(&session, &submitted(4, 2), &PlayerId::from("host"), 1_000)
            .unwrap();

        let err = validator
            .validate_match_result(&session, &submitted(4, 2), &PlayerId::from("host"), 2_000)
            .unwrap_err();
        assert_eq!(err, ValidationError::SessionClosed(session.clone()));

        // One committed result, stats applied exactly once.
        assert_eq!(store.match_results().unwrap().len(), 1);
        let stats = store.player_stats(&PlayerId::from("host")).unwrap().unwrap();
        assert_eq!(stats.kills, 4);
        assert_eq!(stats.matches_played, 1);
    }

    #[test]
    fn commit_updates_stats_and_ends_session() {
        let (store, validator, session) = fixture(4, 2);
        validator
            .validate_match_result(&session, &submitted(4, 2), &PlayerId::from("host"), 1_000)
            .unwrap();

        let stats = store.player_stats(&PlayerId::from("host")).unwrap().unwrap();
        assert_eq!(stats.kills, 4);
        assert_eq!(stats.matches_played, 1);
        assert_eq!(store.session(&session).unwrap().status, SessionStatus::Ended);
    }
}
