//! # WARFRONT Session Store
//!
//! The storage seam of the validation core. Validators and the matchmaker
//! talk to [`SessionStore`], an abstract keyed-record contract: read,
//! closure-scoped update, append-to-log, atomic queue removal, batched
//! result commits, and change subscription. The production deployment backs
//! this with a managed realtime database; tests and single-node runs use
//! [`MemoryStore`].
//!
//! ## Failure Philosophy
//!
//! A storage failure is infrastructure, not gameplay. [`StoreError`] is a
//! separate channel from validation verdicts so a flaky backend can never
//! masquerade as a cheat rejection.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{MatchResult, SessionStore, StoreEvent};
