//! # WARFRONT Arsenal
//!
//! Static balance data for the validation core: weapon ballistic profiles,
//! the hitbox damage-multiplier table, per-mode session settings, and the
//! anti-cheat tolerance constants.
//!
//! ## Design Rules
//!
//! 1. **Single source of truth** - The client duplicated the hitbox table in
//!    two places and let them drift; here every validator reads the same one
//! 2. **External configuration** - Every table deserializes from TOML, with
//!    compiled-in defaults matching live balance
//! 3. **Immutable after load** - Catalogs are built once and shared by
//!    reference; nothing here mutates at runtime
//!
//! ## Example
//!
//! ```rust,ignore
//! use warfront_arsenal::{WeaponCatalog, HitboxTable};
//!
//! let catalog = WeaponCatalog::builtin();
//! let profile = catalog.profile(&"ar_standard".into());
//! assert_eq!(profile.fire_rate_rpm, 600.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod hitbox;
pub mod modes;
pub mod tolerances;
pub mod weapons;

pub use error::ArsenalError;
pub use hitbox::HitboxTable;
pub use modes::mode_settings;
pub use tolerances::Tolerances;
pub use weapons::{WeaponCatalog, WeaponProfile};
