//! # WARFRONT Security
//!
//! Server-authoritative validation of gameplay events.
//!
//! ## Philosophy
//!
//! NEVER trust the client. The client says "I fired", "I hit for 84",
//! "we won 100 to 62". We verify each claim against the session store and
//! the arsenal catalog, reject what physics or balance rules out, and leave
//! an audit record behind every rejection.
//!
//! ## Two failure channels
//!
//! A *rejection* ([`Verdict`]) is gameplay: the event was understood and
//! turned down. An *error* ([`ValidationError`]) is not gameplay: the
//! caller was unauthenticated, referenced something that does not exist, or
//! the store timed out. The two never mix, so a flaky backend cannot brand
//! a player a cheater.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod damage;
pub mod match_result;
pub mod movement;
pub mod shot;
pub mod verdict;

pub use damage::DamageValidator;
pub use match_result::{MatchOutcome, MatchResultValidator};
pub use movement::{MovementMonitor, SpeedWarning};
pub use shot::ShotValidator;
pub use verdict::{RejectReason, ValidationError, ValidationResult, Verdict};
