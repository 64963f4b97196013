//! # WARFRONT Matchmaking
//!
//! Pairs waiting players into sessions by rating and latency proximity.
//!
//! ## Flow
//!
//! A new queue entry triggers [`Matchmaker::try_match`]: scan the queue,
//! filter compatible candidates, rank them, and - if the mode's quota can
//! be met - claim everyone atomically, shuffle the roster into two teams,
//! and create the session. Entries not matched stay queued until their
//! owner withdraws them or the wait timeout sweep removes them.
//!
//! ## Team split
//!
//! The split is a pure random shuffle, not skill-balanced. That is the
//! shipped behavior; do not "fix" it here without a product decision.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod matchmaker;

pub use matchmaker::{FormedMatch, Matchmaker};
