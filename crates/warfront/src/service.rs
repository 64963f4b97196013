//! # The Validation Service
//!
//! One struct owning every validator, wired to a shared store and weapon
//! catalog. Entry points mirror the client-facing RPC surface: each takes
//! an [`AuthContext`], requires an identity, and delegates.
//!
//! The authenticated uid IS the actor. A client cannot fire a shot or
//! report damage on behalf of another player id, because the attacker
//! field never comes from the request payload.

use crate::auth::AuthContext;
use std::sync::Arc;
use warfront_arsenal::{HitboxTable, Tolerances, WeaponCatalog};
use warfront_core::{
    EntryId, GameMode, HitRegion, MatchmakingEntry, PlayerId, Position, SessionId,
    SubmittedResults, WeaponId,
};
use warfront_security::{
    DamageValidator, MatchOutcome, MatchResultValidator, MovementMonitor, ShotValidator,
    SpeedWarning, ValidationResult, Verdict,
};
use warfront_store::SessionStore;

/// Authenticated facade over the validators and the matchmaking queue.
pub struct ValidationService {
    store: Arc<dyn SessionStore>,
    shots: ShotValidator,
    damage: DamageValidator,
    results: MatchResultValidator,
    movement: MovementMonitor,
}

impl ValidationService {
    /// Wires up all validators against one store and catalog.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<WeaponCatalog>,
        hitboxes: HitboxTable,
        tolerances: Tolerances,
    ) -> Self {
        Self {
            shots: ShotValidator::new(store.clone(), catalog.clone(), tolerances),
            damage: DamageValidator::new(store.clone(), catalog, hitboxes, tolerances),
            results: MatchResultValidator::new(store.clone(), tolerances),
            movement: MovementMonitor::new(store.clone(), tolerances),
            store,
        }
    }

    /// Validates a fire event reported by the authenticated player.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for anonymous callers; otherwise whatever the
    /// underlying validator raises.
    pub fn validate_shot(
        &self,
        auth: &AuthContext,
        session_id: &SessionId,
        weapon: &WeaponId,
        origin: Position,
        timestamp_ms: u64,
    ) -> ValidationResult<Verdict> {
        let attacker = auth.require()?;
        self.shots
            .validate_shot(session_id, attacker, weapon, origin, timestamp_ms)
    }

    /// Validates a damage claim from the authenticated attacker.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for anonymous callers; otherwise whatever the
    /// underlying validator raises.
    #[allow(clippy::too_many_arguments)]
    pub fn validate_damage(
        &self,
        auth: &AuthContext,
        session_id: &SessionId,
        victim: &PlayerId,
        damage: f32,
        weapon: &WeaponId,
        hit_region: HitRegion,
        distance: f32,
        timestamp_ms: u64,
    ) -> ValidationResult<Verdict> {
        let attacker = auth.require()?;
        self.damage.validate_damage(
            session_id,
            attacker,
            victim,
            damage,
            weapon,
            hit_region,
            distance,
            timestamp_ms,
        )
    }

    /// Verifies and commits a match result submitted by the session host.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for anonymous callers; `PermissionDenied` when the
    /// caller is not the host; otherwise whatever the underlying validator
    /// raises.
    pub fn validate_match_result(
        &self,
        auth: &AuthContext,
        session_id: &SessionId,
        submitted: &SubmittedResults,
        now_ms: u64,
    ) -> ValidationResult<MatchOutcome> {
        let submitter = auth.require()?;
        self.results
            .validate_match_result(session_id, submitted, submitter, now_ms)
    }

    /// Ingests a position report from the authenticated player.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for anonymous callers; otherwise whatever the
    /// underlying monitor raises.
    pub fn observe_movement(
        &self,
        auth: &AuthContext,
        session_id: &SessionId,
        position: Position,
        timestamp_ms: u64,
    ) -> ValidationResult<Option<SpeedWarning>> {
        let player = auth.require()?;
        self.movement
            .observe(session_id, player, position, timestamp_ms)
    }

    /// Places the authenticated player in the matchmaking queue.
    ///
    /// Returns the entry id the client uses to withdraw. The store
    /// publishes the queued event; a running [`QueuePump`](crate::QueuePump)
    /// picks it up from there.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for anonymous callers, `Store` on storage failure.
    pub fn enqueue_player(
        &self,
        auth: &AuthContext,
        mode: GameMode,
        rating: i32,
        ping_ms: u32,
        squad: Option<String>,
        now_ms: u64,
    ) -> ValidationResult<EntryId> {
        let player = auth.require()?;
        let id = EntryId::new(format!("q-{player}-{now_ms}"));
        let entry = MatchmakingEntry {
            id: id.clone(),
            player: player.clone(),
            squad,
            rating,
            mode,
            ping_ms,
            enqueued_at_ms: now_ms,
        };
        self.store.enqueue(entry)?;
        tracing::debug!(entry = %id, player = %player, mode = %mode, "player queued");
        Ok(id)
    }
}
