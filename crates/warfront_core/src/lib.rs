//! # WARFRONT Core Types
//!
//! Shared domain vocabulary for the WARFRONT validation core.
//!
//! ## Design Rules
//!
//! 1. **Data only** - No storage, no validation logic, no I/O
//! 2. **Stable identifiers** - Players and sessions are keyed by opaque
//!    string ids issued by the auth layer
//! 3. **One-way lifecycles** - Session status never moves backwards
//!
//! ## Example
//!
//! ```rust,ignore
//! use warfront_core::{Position, SessionRecord, GameMode};
//!
//! let spawn = Position::new(0.0, 0.0, 0.0);
//! let session = SessionRecord::new(session_id, host_id, GameMode::Team, settings);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod activity;
pub mod ids;
pub mod math;
pub mod mode;
pub mod queue;
pub mod session;

pub use activity::{SuspiciousActivity, ViolationKind};
pub use ids::{EntryId, PlayerId, SessionId, WeaponId};
pub use math::Position;
pub use mode::{GameMode, HitRegion, Team};
pub use queue::MatchmakingEntry;
pub use session::{
    KillEntry, PlayerSessionState, PlayerStats, SessionRecord, SessionSettings, SessionStatus,
    StatDelta, SubmittedResults, TeamScores,
};
