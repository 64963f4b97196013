//! # Teams, Game Modes, and Hit Regions
//!
//! Fixed enumerations shared by the validators and the matchmaker. Hit
//! regions arrive from the client as free-form strings; anything we do not
//! recognize maps to [`HitRegion::Other`] and earns no damage bonus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team assignment within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// First half of the shuffled roster.
    Alpha,
    /// Second half of the shuffled roster.
    Bravo,
}

impl Team {
    /// The opposing team.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Alpha => Self::Bravo,
            Self::Bravo => Self::Alpha,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => f.write_str("alpha"),
            Self::Bravo => f.write_str("bravo"),
        }
    }
}

/// Requested game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// One versus one.
    Duel,
    /// Two squads of two.
    Squad,
    /// Full team battle, four versus four.
    Team,
}

impl GameMode {
    /// Number of players required to start a session of this mode.
    #[inline]
    #[must_use]
    pub const fn required_players(self) -> usize {
        match self {
            Self::Duel => 2,
            Self::Squad => 4,
            Self::Team => 8,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duel => f.write_str("duel"),
            Self::Squad => f.write_str("squad"),
            Self::Team => f.write_str("team"),
        }
    }
}

/// Body region reported for a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitRegion {
    /// Headshot.
    Head,
    /// Neck, just under a headshot.
    Neck,
    /// Center of mass.
    Chest,
    /// Lower torso.
    Stomach,
    /// Upper limbs.
    Arms,
    /// Hands.
    Hands,
    /// Lower limbs.
    Legs,
    /// Feet.
    Feet,
    /// Anything the client sent that we do not recognize.
    Other,
}

impl HitRegion {
    /// Parses a wire string. Unknown names map to [`HitRegion::Other`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "head" => Self::Head,
            "neck" => Self::Neck,
            "chest" => Self::Chest,
            "stomach" => Self::Stomach,
            "arms" => Self::Arms,
            "hands" => Self::Hands,
            "legs" => Self::Legs,
            "feet" => Self::Feet,
            _ => Self::Other,
        }
    }
}
