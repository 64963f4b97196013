//! # Per-Mode Session Settings
//!
//! Score and time limits per game mode. Friendly fire is off everywhere by
//! default; a host can flip it per session.

use warfront_core::{GameMode, SessionSettings};

/// Default session settings for a mode.
#[must_use]
pub const fn mode_settings(mode: GameMode) -> SessionSettings {
    match mode {
        GameMode::Duel => SessionSettings {
            friendly_fire: false,
            score_limit: 10,
            time_limit_secs: 600,
        },
        GameMode::Squad => SessionSettings {
            friendly_fire: false,
            score_limit: 50,
            time_limit_secs: 900,
        },
        GameMode::Team => SessionSettings {
            friendly_fire: false,
            score_limit: 100,
            time_limit_secs: 600,
        },
    }
}
