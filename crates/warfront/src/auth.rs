//! # Caller Identity
//!
//! The transport layer (whatever it is) resolves credentials into an
//! [`AuthContext`] before calling the service. The service itself only
//! ever asks one question: is there a verified identity or not.

use warfront_core::PlayerId;
use warfront_security::{ValidationError, ValidationResult};

/// The verified identity of a caller, or the lack of one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthContext {
    uid: Option<PlayerId>,
}

impl AuthContext {
    /// A caller with a verified identity.
    #[must_use]
    pub const fn authenticated(uid: PlayerId) -> Self {
        Self { uid: Some(uid) }
    }

    /// A caller with no identity. Every service entry point rejects this.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { uid: None }
    }

    /// The caller's identity.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Unauthenticated`] when there is none. This check
    /// runs before any state is read, so an anonymous caller cannot probe
    /// for session existence.
    pub fn require(&self) -> ValidationResult<&PlayerId> {
        self.uid.as_ref().ok_or(ValidationError::Unauthenticated)
    }
}
