//! # Damage Validation
//!
//! Hit reports are checked against the session roster, the friendly-fire
//! rule, and the weapon's damage ceiling and reach. The checks run in a
//! fixed order; friendly fire short-circuits before any arithmetic.

use crate::verdict::{RejectReason, ValidationResult, Verdict};
use std::sync::Arc;
use warfront_arsenal::{HitboxTable, Tolerances, WeaponCatalog};
use warfront_core::{
    HitRegion, PlayerId, SessionId, SuspiciousActivity, ViolationKind, WeaponId,
};
use warfront_store::SessionStore;

/// Validates damage-application events.
pub struct DamageValidator {
    store: Arc<dyn SessionStore>,
    catalog: Arc<WeaponCatalog>,
    hitboxes: HitboxTable,
    tolerances: Tolerances,
}

impl DamageValidator {
    /// Creates a validator over a store, catalog, and hitbox table.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<WeaponCatalog>,
        hitboxes: HitboxTable,
        tolerances: Tolerances,
    ) -> Self {
        Self {
            store,
            catalog,
            hitboxes,
            tolerances,
        }
    }

    /// Validates a damage claim.
    ///
    /// Check order: roster membership, friendly fire, damage ceiling,
    /// range. Every rejection past the roster check leaves a
    /// suspicious-activity record.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SessionNotFound`] when the session is gone,
    /// [`ValidationError::Store`] on transient storage failure. A
    /// participant missing from the roster is a *rejection*
    /// ([`RejectReason::PlayerNotInMatch`]), mirroring the wire contract.
    #[allow(clippy::too_many_arguments)]
    pub fn validate_damage(
        &self,
        session_id: &SessionId,
        attacker: &PlayerId,
        victim: &PlayerId,
        damage: f32,
        weapon: &WeaponId,
        hit_region: HitRegion,
        distance: f32,
        timestamp_ms: u64,
    ) -> ValidationResult<Verdict> {
        let record = self.store.session(session_id)?;

        let (Some(attacker_state), Some(victim_state)) =
            (record.player(attacker), record.player(victim))
        else {
            return Ok(Verdict::reject(RejectReason::PlayerNotInMatch));
        };

        // Team kill with friendly fire off: decided before any numbers.
        if attacker_state.team == victim_state.team && !record.settings.friendly_fire {
            tracing::debug!(player = %attacker, "friendly fire rejected");
            return Ok(Verdict::reject(RejectReason::FriendlyFireDisabled));
        }

        let profile = self.catalog.profile(weapon);

        let max_damage = profile.damage * self.hitboxes.multiplier(hit_region);
        if damage > max_damage * self.tolerances.damage_headroom {
            self.report(
                attacker,
                ViolationKind::DamageTooHigh,
                &format!("damage={damage:.1} max={max_damage:.1}"),
                timestamp_ms,
            );
            return Ok(Verdict::reject(RejectReason::InvalidDamage));
        }

        if distance > profile.range * self.tolerances.range_headroom {
            self.report(
                attacker,
                ViolationKind::RangeTooHigh,
                &format!("distance={distance:.1} range={:.1}", profile.range),
                timestamp_ms,
            );
            return Ok(Verdict::reject(RejectReason::OutOfRange));
        }

        Ok(Verdict::pass())
    }

    /// Records a suspicious-activity entry. Failures are logged and
    /// swallowed; reporting never blocks the validation response.
    fn report(&self, player: &PlayerId, kind: ViolationKind, detail: &str, timestamp_ms: u64) {
        tracing::warn!(player = %player, violation = %kind, detail, "damage rejected");
        let activity = SuspiciousActivity::new(player.clone(), kind, detail, timestamp_ms);
        if let Err(err) = self.store.log_suspicious(activity) {
            tracing::warn!(player = %player, error = %err, "failed to record suspicious activity");
        }
    }
}
