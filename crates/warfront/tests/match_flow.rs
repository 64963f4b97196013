//! End-to-end scenarios over the full service: queue in, match formed,
//! shots and damage validated, result verified and committed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use warfront::{AuthContext, QueuePump, ValidationService};
use warfront_arsenal::{HitboxTable, Tolerances, WeaponCatalog};
use warfront_core::{
    GameMode, HitRegion, KillEntry, PlayerId, Position, SessionStatus, StatDelta,
    SubmittedResults, Team, TeamScores, ViolationKind, WeaponId,
};
use warfront_matchmaking::{FormedMatch, Matchmaker};
use warfront_security::ValidationError;
use warfront_store::{MemoryStore, SessionStore};

struct Harness {
    store: Arc<MemoryStore>,
    service: ValidationService,
    pump: QueuePump,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let service = ValidationService::new(
        store.clone(),
        Arc::new(WeaponCatalog::builtin()),
        HitboxTable::default(),
        Tolerances::default(),
    );
    let matchmaker = Matchmaker::with_rng(
        store.clone(),
        Tolerances::default(),
        StdRng::seed_from_u64(42),
    );
    // Subscribe before any enqueue so no event is missed.
    let pump = QueuePump::new(store.clone(), matchmaker);
    Harness {
        store,
        service,
        pump,
    }
}

fn auth(name: &str) -> AuthContext {
    AuthContext::authenticated(PlayerId::from(name))
}

/// Queues `count` players in `mode` with tightly clustered ratings and
/// good pings, then drains the pump.
fn form_match(h: &Harness, mode: GameMode, count: i32) -> Vec<FormedMatch> {
    for i in 1..=count {
        h.service
            .enqueue_player(
                &auth(&format!("p{i}")),
                mode,
                1000 + i * 5,
                30,
                None,
                u64::try_from(i).unwrap(),
            )
            .unwrap();
    }
    h.pump.drain(1_000).unwrap()
}

#[test]
fn anonymous_callers_are_rejected_before_any_lookup() {
    let h = harness();
    let anon = AuthContext::anonymous();
    let session = warfront_core::SessionId::from("does-not-matter");

    let err = h
        .service
        .validate_shot(
            &anon,
            &session,
            &WeaponId::from("ar_standard"),
            Position::new(0.0, 0.0, 0.0),
            0,
        )
        .unwrap_err();
    assert_eq!(err, ValidationError::Unauthenticated);

    let err = h
        .service
        .enqueue_player(&anon, GameMode::Duel, 1000, 30, None, 0)
        .unwrap_err();
    assert_eq!(err, ValidationError::Unauthenticated);
    assert!(h.store.queue_snapshot().unwrap().is_empty());
}

#[test]
fn eight_enqueues_pump_into_one_team_session() {
    let h = harness();
    let formed = form_match(&h, GameMode::Team, 8);

    // One session from eight entries; the seven stale notifications
    // that follow the first find an empty queue.
    assert_eq!(formed.len(), 1);
    assert_eq!(formed[0].alpha.len(), 4);
    assert_eq!(formed[0].bravo.len(), 4);
    assert!(h.store.queue_snapshot().unwrap().is_empty());

    let record = h.store.session(&formed[0].session_id).unwrap();
    assert_eq!(record.status, SessionStatus::Waiting);
    assert_eq!(record.players.len(), 8);
    assert_eq!(record.settings.score_limit, 100);
}

#[test]
fn five_enqueues_leave_the_squad_queue_waiting() {
    let h = harness();
    // Squad needs 4; 5 entries form one match and strand the leftover.
    let formed = form_match(&h, GameMode::Squad, 5);
    assert_eq!(formed.len(), 1);
    assert_eq!(h.store.queue_snapshot().unwrap().len(), 1);
}

#[test]
fn duel_lifecycle_with_an_honest_host() {
    let h = harness();
    let formed = form_match(&h, GameMode::Duel, 2);
    assert_eq!(formed.len(), 1);
    let session = formed[0].session_id.clone();
    let killer = formed[0].alpha[0].clone();
    let victim = formed[0].bravo[0].clone();
    let weapon = WeaponId::from("ar_standard");

    // The killer fires and lands a chest hit at close range.
    let shot = h
        .service
        .validate_shot(
            &AuthContext::authenticated(killer.clone()),
            &session,
            &weapon,
            Position::new(0.0, 0.0, 0.0),
            5_000,
        )
        .unwrap();
    assert!(shot.is_valid());

    let hit = h
        .service
        .validate_damage(
            &AuthContext::authenticated(killer.clone()),
            &session,
            &victim,
            28.0,
            &weapon,
            HitRegion::Chest,
            40.0,
            5_050,
        )
        .unwrap();
    assert!(hit.is_valid());

    for ts in [5_050, 9_000, 14_000] {
        h.store
            .append_kill(
                &session,
                KillEntry {
                    killer: killer.clone(),
                    victim: victim.clone(),
                    killer_team: Team::Alpha,
                    team_kill: false,
                    weapon: weapon.clone(),
                    timestamp_ms: ts,
                },
            )
            .unwrap();
    }

    // The host's claim matches the kill log exactly.
    let host = h.store.session(&session).unwrap().host.clone();
    let mut player_stats = HashMap::new();
    player_stats.insert(
        killer.clone(),
        StatDelta {
            kills: 3,
            deaths: 0,
            assists: 0,
        },
    );
    player_stats.insert(
        victim.clone(),
        StatDelta {
            kills: 0,
            deaths: 3,
            assists: 0,
        },
    );
    let submitted = SubmittedResults {
        scores: TeamScores { alpha: 3, bravo: 0 },
        player_stats,
    };

    let outcome = h
        .service
        .validate_match_result(
            &AuthContext::authenticated(host),
            &session,
            &submitted,
            600_000,
        )
        .unwrap();
    assert!(outcome.success);
    assert!(!outcome.flagged);
    assert_eq!(outcome.reconstructed, TeamScores { alpha: 3, bravo: 0 });

    // Stats landed and the session is closed.
    let stats = h.store.player_stats(&killer).unwrap().unwrap();
    assert_eq!(stats.kills, 3);
    assert_eq!(stats.matches_played, 1);
    assert_eq!(
        h.store.session(&session).unwrap().status,
        SessionStatus::Ended
    );
}

#[test]
fn inflated_scores_are_flagged_but_still_committed() {
    let h = harness();
    let formed = form_match(&h, GameMode::Duel, 2);
    let session = formed[0].session_id.clone();
    let killer = formed[0].alpha[0].clone();
    let victim = formed[0].bravo[0].clone();

    h.store
        .append_kill(
            &session,
            KillEntry {
                killer,
                victim,
                killer_team: Team::Alpha,
                team_kill: false,
                weapon: WeaponId::from("pistol_standard"),
                timestamp_ms: 1_000,
            },
        )
        .unwrap();

    // Claims 9 points for alpha; the log supports 1.
    let host = h.store.session(&session).unwrap().host.clone();
    let submitted = SubmittedResults {
        scores: TeamScores { alpha: 9, bravo: 0 },
        player_stats: HashMap::new(),
    };
    let outcome = h
        .service
        .validate_match_result(
            &AuthContext::authenticated(host),
            &session,
            &submitted,
            600_000,
        )
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.flagged);

    let record = h.store.session(&session).unwrap();
    assert!(record.flagged_for_review.is_some());
    let log = h.store.suspicious_activity().unwrap();
    assert!(log.iter().any(|a| a.kind == ViolationKind::ScoreMismatch));
}

#[test]
fn non_host_result_submission_is_denied() {
    let h = harness();
    let formed = form_match(&h, GameMode::Duel, 2);
    let session = formed[0].session_id.clone();

    let host = h.store.session(&session).unwrap().host.clone();
    let outsider = if formed[0].alpha[0] == host {
        formed[0].bravo[0].clone()
    } else {
        formed[0].alpha[0].clone()
    };

    let submitted = SubmittedResults {
        scores: TeamScores::default(),
        player_stats: HashMap::new(),
    };
    let err = h
        .service
        .validate_match_result(
            &AuthContext::authenticated(outsider),
            &session,
            &submitted,
            600_000,
        )
        .unwrap_err();
    assert_eq!(err, ValidationError::PermissionDenied);
}
