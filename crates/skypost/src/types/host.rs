//! PDS host URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the PDS a post is published to.
///
/// The URL must be absolute and use HTTPS (HTTP is allowed for localhost, so
/// tests can run against a local mock server). It is normalized so that XRPC
/// endpoint URLs come out without duplicate slashes.
///
/// # Example
///
/// ```
/// use skypost::Host;
///
/// let host = Host::new("https://bsky.social").unwrap();
/// assert_eq!(host.xrpc_url("com.atproto.server.createSession"),
///            "https://bsky.social/xrpc/com.atproto.server.createSession");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host(Url);

impl Host {
    /// Parse and validate a host URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is relative, has no host, or uses a scheme
    /// other than HTTPS (HTTP for localhost excepted).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Host {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;
        Ok(Self(url))
    }

    /// Returns the full URL of an XRPC endpoint on this host.
    pub fn xrpc_url(&self, method: &str) -> String {
        // Url renders a root path as a trailing slash; strip it before
        // appending the /xrpc/ segment.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/xrpc/{}", base, method)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if url.scheme() != "https" && !(url.scheme() == "http" && is_localhost) {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Host {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Host {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_host() {
        assert!(Host::new("https://bsky.social").is_ok());
    }

    #[test]
    fn valid_localhost_http() {
        assert!(Host::new("http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn rejects_http_non_localhost() {
        assert!(Host::new("http://bsky.social").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(Host::new("/xrpc/method").is_err());
    }

    #[test]
    fn xrpc_url_handles_trailing_slash() {
        let host = Host::new("https://bsky.social/").unwrap();
        assert_eq!(
            host.xrpc_url("com.atproto.repo.uploadBlob"),
            "https://bsky.social/xrpc/com.atproto.repo.uploadBlob"
        );
    }
}
