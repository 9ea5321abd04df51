//! Access
//!
//! Gate in front of the manager screens.

use std::fmt;

use zeroize::Zeroizing;

/// Decides whether a typed password grants manager access.
pub trait AccessGate {
    /// Returns `true` if `input` grants access.
    fn check(&self, input: &str) -> bool;
}

/// Grants access when the input equals a single shared password.
pub struct PasswordGate {
    secret: Zeroizing<String>,
}

impl PasswordGate {
    /// Create a gate for `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl AccessGate for PasswordGate {
    fn check(&self, input: &str) -> bool {
        input == self.secret.as_str()
    }
}

impl fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}
