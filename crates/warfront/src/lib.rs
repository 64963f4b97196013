//! # WARFRONT Validation Service
//!
//! The facade the game server exposes to clients. Clients report what they
//! did; this crate decides what actually happened.
//!
//! ## Layers
//!
//! - [`AuthContext`] - caller identity, checked before anything else
//! - [`ValidationService`] - authenticated wrappers over the shot, damage,
//!   result, and movement validators plus the matchmaking queue
//! - [`QueuePump`] - drives the [`Matchmaker`](warfront_matchmaking::Matchmaker)
//!   from store change notifications
//!
//! ## Trust model
//!
//! Trust no one. Every client-supplied number is checked against the
//! weapon catalog and session state before it is allowed to change
//! anything. Rejections come back as verdicts, not errors: a cheater's
//! request succeeded at the transport level and failed at the rules level,
//! and the two must never be confused.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod auth;
pub mod pump;
pub mod service;

pub use auth::AuthContext;
pub use pump::QueuePump;
pub use service::ValidationService;
