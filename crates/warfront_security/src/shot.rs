//! # Shot Validation
//!
//! Fire events are checked against movement speed and the weapon's cyclic
//! rate, then the player's combat state is advanced. Checks and state
//! advancement run inside one store update closure: an accepted shot
//! updates state exactly once, a rejected shot writes nothing.

use crate::verdict::{RejectReason, ValidationError, ValidationResult, Verdict};
use std::sync::Arc;
use warfront_arsenal::{Tolerances, WeaponCatalog};
use warfront_core::{
    PlayerId, Position, SessionId, SuspiciousActivity, ViolationKind, WeaponId,
};
use warfront_store::SessionStore;

/// What happened inside the update closure.
enum Outcome {
    MissingPlayer,
    Rejected(RejectReason, ViolationKind, String),
    Accepted,
}

/// Validates fire events.
pub struct ShotValidator {
    store: Arc<dyn SessionStore>,
    catalog: Arc<WeaponCatalog>,
    tolerances: Tolerances,
}

impl ShotValidator {
    /// Creates a validator over a store and catalog.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<WeaponCatalog>,
        tolerances: Tolerances,
    ) -> Self {
        Self {
            store,
            catalog,
            tolerances,
        }
    }

    /// Validates a fire event and, if accepted, advances the attacker's
    /// last-shot and last-position state.
    ///
    /// The first shot of a session passes the speed and rate checks:
    /// there is nothing to compare against yet.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SessionNotFound`] / [`ValidationError::PlayerNotFound`]
    /// when the references dangle, [`ValidationError::Store`] on transient
    /// storage failure. Cheat suspicion is a rejection, never an error.
    pub fn validate_shot(
        &self,
        session_id: &SessionId,
        attacker: &PlayerId,
        weapon: &WeaponId,
        origin: Position,
        timestamp_ms: u64,
    ) -> ValidationResult<Verdict> {
        let profile = self.catalog.profile(weapon);
        let min_elapsed_ms =
            profile.min_shot_interval_ms() * self.tolerances.fire_interval_slack;
        let max_speed = f64::from(self.tolerances.max_speed);
        let epsilon_ms = self.tolerances.speed_epsilon_ms.max(1);

        let mut outcome = Outcome::MissingPlayer;
        self.store.update_session(session_id, &mut |record| {
            let Some(state) = record.player_mut(attacker) else {
                outcome = Outcome::MissingPlayer;
                return;
            };

            // Speed check against the previous position report.
            if let Some(sample) = state.last_position {
                let elapsed_ms = timestamp_ms
                    .saturating_sub(sample.timestamp_ms)
                    .max(epsilon_ms);
                let distance = f64::from(sample.position.distance_to(origin));
                let speed = distance / (elapsed_ms as f64 / 1000.0);
                if speed > max_speed {
                    outcome = Outcome::Rejected(
                        RejectReason::SpeedExceeded,
                        ViolationKind::SpeedHack,
                        format!("speed={speed:.1} max={max_speed:.1}"),
                    );
                    return;
                }
            }

            // Fire-rate check against the last accepted shot.
            if let Some(last_shot) = state.last_shot_ms {
                let elapsed_ms = timestamp_ms.saturating_sub(last_shot) as f64;
                if elapsed_ms < min_elapsed_ms {
                    outcome = Outcome::Rejected(
                        RejectReason::FireRateExceeded,
                        ViolationKind::FireRateExceeded,
                        format!("interval_ms={elapsed_ms:.0} min_ms={min_elapsed_ms:.1}"),
                    );
                    return;
                }
            }

            state.record_shot(timestamp_ms);
            state.record_position(origin, timestamp_ms);
            outcome = Outcome::Accepted;
        })?;

        match outcome {
            Outcome::MissingPlayer => Err(ValidationError::PlayerNotFound(attacker.clone())),
            Outcome::Rejected(reason, kind, detail) => {
                self.report(attacker, kind, &detail, timestamp_ms);
                Ok(Verdict::reject(reason))
            }
            Outcome::Accepted => {
                tracing::debug!(player = %attacker, weapon = %weapon, "shot accepted");
                Ok(Verdict::pass())
            }
        }
    }

    /// Records a suspicious-activity entry. Failures are logged and
    /// swallowed; reporting never blocks the validation response.
    fn report(&self, player: &PlayerId, kind: ViolationKind, detail: &str, timestamp_ms: u64) {
        tracing::warn!(player = %player, violation = %kind, detail, "shot rejected");
        let activity = SuspiciousActivity::new(player.clone(), kind, detail, timestamp_ms);
        if let Err(err) = self.store.log_suspicious(activity) {
            tracing::warn!(player = %player, error = %err, "failed to record suspicious activity");
        }
    }
}
