//! # Session Records
//!
//! The authoritative state of one match: roster, per-player combat state,
//! kill log, and lifecycle status.
//!
//! ## Lifecycle
//!
//! `Waiting -> Playing -> Ended`, never backwards. A record is created when
//! the matchmaker forms a session (or a host opens one explicitly), mutated
//! by the validators as a side effect of accepted events, and archived after
//! match end.

use crate::ids::{PlayerId, SessionId, WeaponId};
use crate::math::Position;
use crate::mode::{GameMode, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many recent shot timestamps we keep per player.
///
/// Matches the depth of the shot history the fire-rate check inspects.
pub const RECENT_SHOT_WINDOW: usize = 5;

/// One-way session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Formed, waiting for players to load in.
    Waiting,
    /// Match in progress.
    Playing,
    /// Match over; record kept for a grace period.
    Ended,
}

/// Per-session rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Whether teammates can damage each other.
    pub friendly_fire: bool,
    /// Team score that ends the match.
    pub score_limit: u32,
    /// Wall-clock limit in seconds.
    pub time_limit_secs: u32,
}

/// A position report paired with when it was made.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Reported world position.
    pub position: Position,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Combat state the server tracks for one player in one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSessionState {
    /// The player this state belongs to.
    pub player_id: PlayerId,
    /// Team assignment.
    pub team: Team,
    /// Last position report, if any.
    pub last_position: Option<PositionSample>,
    /// Timestamp of the last accepted shot. Monotonically non-decreasing.
    pub last_shot_ms: Option<u64>,
    /// Recent accepted shot timestamps, most-recent-last, bounded.
    pub recent_shots: Vec<u64>,
}

impl PlayerSessionState {
    /// Creates fresh state for a player joining a session.
    #[must_use]
    pub fn new(player_id: PlayerId, team: Team) -> Self {
        Self {
            player_id,
            team,
            last_position: None,
            last_shot_ms: None,
            recent_shots: Vec::new(),
        }
    }

    /// Records an accepted shot.
    ///
    /// The last-shot timestamp never moves backwards even if the caller
    /// hands us a stale clock reading.
    pub fn record_shot(&mut self, timestamp_ms: u64) {
        let advanced = match self.last_shot_ms {
            Some(last) => last.max(timestamp_ms),
            None => timestamp_ms,
        };
        self.last_shot_ms = Some(advanced);

        self.recent_shots.push(timestamp_ms);
        if self.recent_shots.len() > RECENT_SHOT_WINDOW {
            self.recent_shots.remove(0);
        }
    }

    /// Records a position report.
    pub fn record_position(&mut self, position: Position, timestamp_ms: u64) {
        self.last_position = Some(PositionSample {
            position,
            timestamp_ms,
        });
    }
}

/// One entry in the session kill log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KillEntry {
    /// Who got the kill.
    pub killer: PlayerId,
    /// Who died.
    pub victim: PlayerId,
    /// The killer's team at the time of the kill.
    pub killer_team: Team,
    /// Whether killer and victim shared a team (scores nothing).
    pub team_kill: bool,
    /// Weapon used.
    pub weapon: WeaponId,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Per-team scores, claimed or reconstructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    /// Alpha team score.
    pub alpha: u32,
    /// Bravo team score.
    pub bravo: u32,
}

impl TeamScores {
    /// Score for one team.
    #[inline]
    #[must_use]
    pub const fn team(&self, team: Team) -> u32 {
        match team {
            Team::Alpha => self.alpha,
            Team::Bravo => self.bravo,
        }
    }

    /// Adds points to one team.
    pub fn add(&mut self, team: Team, points: u32) {
        match team {
            Team::Alpha => self.alpha += points,
            Team::Bravo => self.bravo += points,
        }
    }
}

/// The authoritative record of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session key.
    pub id: SessionId,
    /// The player allowed to submit final results.
    pub host: PlayerId,
    /// Game mode this session was formed for.
    pub mode: GameMode,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Session rules.
    pub settings: SessionSettings,
    /// Roster and per-player combat state.
    pub players: HashMap<PlayerId, PlayerSessionState>,
    /// Append-only kill log, replayed to verify submitted scores.
    pub kill_log: Vec<KillEntry>,
    /// Set when result verification found a discrepancy.
    pub flagged_for_review: Option<String>,
    /// When the session was formed (ms since the Unix epoch).
    pub created_at_ms: u64,
}

impl SessionRecord {
    /// Creates an empty session in `Waiting` status.
    #[must_use]
    pub fn new(
        id: SessionId,
        host: PlayerId,
        mode: GameMode,
        settings: SessionSettings,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id,
            host,
            mode,
            status: SessionStatus::Waiting,
            settings,
            players: HashMap::new(),
            kill_log: Vec::new(),
            flagged_for_review: None,
            created_at_ms,
        }
    }

    /// Adds a player to the roster with fresh combat state.
    pub fn insert_player(&mut self, player_id: PlayerId, team: Team) {
        self.players.insert(
            player_id.clone(),
            PlayerSessionState::new(player_id, team),
        );
    }

    /// Looks up a player's state.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerSessionState> {
        self.players.get(id)
    }

    /// Looks up a player's state mutably.
    #[must_use]
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerSessionState> {
        self.players.get_mut(id)
    }

    /// Advances the lifecycle status.
    ///
    /// Returns `false` (and leaves the record untouched) if `next` would
    /// move the status backwards.
    pub fn advance_status(&mut self, next: SessionStatus) -> bool {
        if next < self.status {
            return false;
        }
        self.status = next;
        true
    }
}

/// Stat increments one match contributes to a player's lifetime record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Kills scored this match.
    pub kills: u32,
    /// Deaths this match.
    pub deaths: u32,
    /// Assists this match.
    pub assists: u32,
}

/// Lifetime player statistics, updated by batched increments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Total kills.
    pub kills: u64,
    /// Total deaths.
    pub deaths: u64,
    /// Total assists.
    pub assists: u64,
    /// Matches completed.
    pub matches_played: u64,
}

impl PlayerStats {
    /// Applies one match's worth of increments.
    pub fn apply(&mut self, delta: &StatDelta) {
        self.kills += u64::from(delta.kills);
        self.deaths += u64::from(delta.deaths);
        self.assists += u64::from(delta.assists);
        self.matches_played += 1;
    }
}

/// The outcome a host submits at match end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmittedResults {
    /// Claimed final team scores.
    pub scores: TeamScores,
    /// Claimed per-player stat increments.
    pub player_stats: HashMap<PlayerId, StatDelta>,
}
