//! # Weapon Catalog
//!
//! Immutable ballistic parameters per weapon. The catalog is the authority
//! the validators check client claims against: damage ceilings, cyclic
//! rates, and effective ranges.
//!
//! Weapons the catalog has never heard of resolve to a conservative default
//! profile rather than an error; an unknown id is a balance-data gap, not a
//! reason to let a match stall.

use crate::error::{ArsenalError, ArsenalResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warfront_core::WeaponId;

/// Ballistic profile for one weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Weapon identifier (catalog key).
    pub id: String,
    /// Base damage per hit, before hitbox multipliers.
    pub damage: f32,
    /// Cyclic rate in rounds per minute.
    pub fire_rate_rpm: f32,
    /// Maximum effective distance in world units.
    pub range: f32,
    /// Armor penetration, 0..1.
    pub penetration: f32,
}

impl WeaponProfile {
    /// Minimum time between two shots at the weapon's cyclic rate.
    #[inline]
    #[must_use]
    pub fn min_shot_interval_ms(&self) -> f64 {
        60_000.0 / f64::from(self.fire_rate_rpm)
    }
}

/// Fallback profile for weapon ids missing from the catalog.
fn default_profile(id: &WeaponId) -> WeaponProfile {
    WeaponProfile {
        id: id.as_str().to_owned(),
        damage: 30.0,
        fire_rate_rpm: 600.0,
        range: 1000.0,
        penetration: 0.5,
    }
}

/// On-disk shape of a weapon catalog.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    /// All weapon profiles.
    weapons: Vec<WeaponProfile>,
}

/// Keyed lookup of weapon profiles. Built once, never mutated.
#[derive(Clone, Debug)]
pub struct WeaponCatalog {
    profiles: HashMap<WeaponId, WeaponProfile>,
}

impl WeaponCatalog {
    /// Builds a catalog from an explicit profile list.
    ///
    /// # Errors
    ///
    /// Rejects profiles with a non-positive fire rate, which would make the
    /// minimum shot interval meaningless.
    pub fn from_profiles(profiles: Vec<WeaponProfile>) -> ArsenalResult<Self> {
        let mut map = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            if profile.fire_rate_rpm <= 0.0 {
                return Err(ArsenalError::BadFireRate {
                    weapon_id: profile.id,
                });
            }
            map.insert(WeaponId::from(profile.id.as_str()), profile);
        }
        Ok(Self { profiles: map })
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ArsenalError::InvalidConfig`] on malformed TOML and
    /// [`ArsenalError::BadFireRate`] on a non-positive fire rate.
    pub fn from_toml_str(text: &str) -> ArsenalResult<Self> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| ArsenalError::InvalidConfig(e.to_string()))?;
        Self::from_profiles(file.weapons)
    }

    /// The live balance roster, compiled in.
    #[must_use]
    pub fn builtin() -> Self {
        let profiles = vec![
            profile("ar_standard", 28.0, 600.0, 300.0, 0.6),
            profile("ar_heavy", 35.0, 450.0, 350.0, 0.7),
            profile("sniper_bolt", 95.0, 60.0, 1000.0, 0.95),
            profile("sniper_dmr", 55.0, 180.0, 800.0, 0.8),
            profile("smg_tactical", 22.0, 900.0, 120.0, 0.4),
            profile("shotgun_combat", 15.0, 80.0, 40.0, 0.3),
            profile("pistol_standard", 20.0, 400.0, 100.0, 0.4),
            profile("lmg_squad", 30.0, 750.0, 400.0, 0.75),
            profile("plasma_rifle", 35.0, 480.0, 250.0, 0.5),
            profile("railgun", 150.0, 30.0, 1200.0, 1.0),
        ];
        // Builtin data is checked by tests; the fallback is unreachable.
        Self::from_profiles(profiles).unwrap_or_else(|_| Self {
            profiles: HashMap::new(),
        })
    }

    /// Looks up a profile, falling back to the default for unknown ids.
    #[must_use]
    pub fn profile(&self, id: &WeaponId) -> WeaponProfile {
        self.profiles
            .get(id)
            .cloned()
            .unwrap_or_else(|| default_profile(id))
    }

    /// Looks up a profile without the fallback.
    #[must_use]
    pub fn profile_exact(&self, id: &WeaponId) -> Option<&WeaponProfile> {
        self.profiles.get(id)
    }

    /// Number of known weapons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn profile(id: &str, damage: f32, fire_rate_rpm: f32, range: f32, penetration: f32) -> WeaponProfile {
    WeaponProfile {
        id: id.to_owned(),
        damage,
        fire_rate_rpm,
        range,
        penetration,
    }
}
