//! # Identifiers
//!
//! Opaque string identifiers issued by the auth layer (players) or by the
//! store (sessions, queue entries). Newtypes keep the key spaces from being
//! mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier string.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

string_id! {
    /// Authenticated player identity (auth uid).
    PlayerId
}

string_id! {
    /// One match instance, pending or in progress.
    SessionId
}

string_id! {
    /// A waiting entry in the matchmaking queue.
    EntryId
}

string_id! {
    /// Weapon identifier in the arsenal catalog (e.g. `ar_standard`).
    WeaponId
}
