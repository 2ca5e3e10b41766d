//! Login credentials type.

use std::fmt;

use crate::types::Host;

/// Login credentials for a posting account.
///
/// Holds the PDS host to publish to, the account identifier (handle or
/// email), and the secret (password or app password). Constructed once per
/// invocation and never mutated.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use skypost::{Credentials, Host};
///
/// let host = Host::new("https://bsky.social").unwrap();
/// let creds = Credentials::new(host, "alice.bsky.social", "app-password-here");
/// assert_eq!(creds.identifier(), "alice.bsky.social");
/// ```
#[derive(Clone)]
pub struct Credentials {
    host: Host,
    identifier: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(host: Host, identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host,
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Returns the PDS host these credentials authenticate against.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the account identifier (handle or email).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing the session-exchange request.
    /// Never log or display this value.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
