//! # Hitbox Multiplier Table
//!
//! One table, owned by whoever validates damage. The client codebase kept
//! two copies of these numbers and they drifted; the server copy here is
//! the only one that counts.

use serde::{Deserialize, Serialize};
use warfront_core::HitRegion;

/// Damage multiplier per body region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxTable {
    /// Headshot multiplier.
    pub head: f32,
    /// Neck multiplier.
    pub neck: f32,
    /// Chest multiplier.
    pub chest: f32,
    /// Stomach multiplier.
    pub stomach: f32,
    /// Arm multiplier.
    pub arms: f32,
    /// Hand multiplier.
    pub hands: f32,
    /// Leg multiplier.
    pub legs: f32,
    /// Foot multiplier.
    pub feet: f32,
}

impl Default for HitboxTable {
    fn default() -> Self {
        Self {
            head: 3.0,
            neck: 2.5,
            chest: 1.0,
            stomach: 1.0,
            arms: 0.8,
            hands: 0.6,
            legs: 0.7,
            feet: 0.5,
        }
    }
}

impl HitboxTable {
    /// Multiplier for a region. Unknown regions get no bonus.
    #[inline]
    #[must_use]
    pub const fn multiplier(&self, region: HitRegion) -> f32 {
        match region {
            HitRegion::Head => self.head,
            HitRegion::Neck => self.neck,
            HitRegion::Chest => self.chest,
            HitRegion::Stomach => self.stomach,
            HitRegion::Arms => self.arms,
            HitRegion::Hands => self.hands,
            HitRegion::Legs => self.legs,
            HitRegion::Feet => self.feet,
            HitRegion::Other => 1.0,
        }
    }
}
