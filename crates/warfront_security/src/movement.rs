//! # Movement Monitoring
//!
//! Speed detection for position reports outside the fire path. The
//! original deployment reacted to database writes through a hidden
//! listener; here it is an explicit handler invoked per report, reading
//! current state at call time, so it can be tested in isolation.

use crate::verdict::{ValidationError, ValidationResult};
use std::sync::Arc;
use warfront_arsenal::Tolerances;
use warfront_core::{PlayerId, Position, SessionId, SuspiciousActivity, ViolationKind};
use warfront_store::SessionStore;

/// A speed violation detected from position reports.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedWarning {
    /// The offending player.
    pub player: PlayerId,
    /// Computed speed in units per second.
    pub speed: f64,
    /// The configured limit it exceeded.
    pub limit: f64,
    /// When the report arrived (ms since the Unix epoch).
    pub timestamp_ms: u64,
}

/// Watches position reports for impossible movement.
pub struct MovementMonitor {
    store: Arc<dyn SessionStore>,
    tolerances: Tolerances,
}

impl MovementMonitor {
    /// Creates a monitor over a store.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, tolerances: Tolerances) -> Self {
        Self { store, tolerances }
    }

    /// Ingests one position report.
    ///
    /// The stored snapshot always advances - a speeding player cannot
    /// freeze their recorded position by tripping the check - and a
    /// violation is returned (and logged) rather than raised.
    ///
    /// # Errors
    ///
    /// [`ValidationError::SessionNotFound`] / [`ValidationError::PlayerNotFound`]
    /// for dangling references, [`ValidationError::Store`] on transient
    /// storage failure.
    pub fn observe(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
        position: Position,
        timestamp_ms: u64,
    ) -> ValidationResult<Option<SpeedWarning>> {
        let limit = f64::from(self.tolerances.max_speed);
        let epsilon_ms = self.tolerances.speed_epsilon_ms.max(1);

        let mut found = false;
        let mut warning = None;
        self.store.update_session(session_id, &mut |record| {
            let Some(state) = record.player_mut(player) else {
                return;
            };
            found = true;

            if let Some(sample) = state.last_position {
                let elapsed_ms = timestamp_ms
                    .saturating_sub(sample.timestamp_ms)
                    .max(epsilon_ms);
                let distance = f64::from(sample.position.distance_to(position));
                let speed = distance / (elapsed_ms as f64 / 1000.0);
                if speed > limit {
                    warning = Some(SpeedWarning {
                        player: player.clone(),
                        speed,
                        limit,
                        timestamp_ms,
                    });
                }
            }

            state.record_position(position, timestamp_ms);
        })?;

        if !found {
            return Err(ValidationError::PlayerNotFound(player.clone()));
        }

        if let Some(w) = &warning {
            tracing::warn!(player = %player, speed = w.speed, limit, "speed violation");
            let activity = SuspiciousActivity::new(
                player.clone(),
                ViolationKind::SpeedHack,
                format!("speed={:.1} max={limit:.1}", w.speed),
                timestamp_ms,
            );
            if let Err(err) = self.store.log_suspicious(activity) {
                tracing::warn!(player = %player, error = %err,
                    "failed to record suspicious activity");
            }
        }

        Ok(warning)
    }
}
