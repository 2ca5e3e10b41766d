//! Error types for the skypost library.
//!
//! This module provides a unified error type with explicit variants for each
//! failure mode of the posting pipeline: transport, authentication, attachment
//! capacity, blob upload, record submission, and input validation.

use std::fmt;
use thiserror::Error;

/// The unified error type for skypost operations.
///
/// Every variant is terminal for the current post operation. The library
/// performs no retry, backoff, or partial rollback; callers that want to retry
/// must start over with a fresh builder (a fresh session and fresh uploads).
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed HTTP).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The session exchange did not yield a usable session.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Too many images attached to a single post.
    #[error("capacity exceeded: {0}")]
    Capacity(#[from] CapacityError),

    /// A blob upload was rejected by the server.
    #[error("blob upload failed: {0}")]
    Upload(ProtocolError),

    /// The record submission was rejected by the server.
    #[error("post submission failed: {0}")]
    Publish(ProtocolError),

    /// Input validation errors (invalid host URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// The createSession response was missing a required field.
///
/// Carries the raw response body so callers can log what the server actually
/// said; on a rejected login the body holds the server's error description.
#[derive(Debug, Error)]
#[error("session response missing '{field}': {body}")]
pub struct AuthError {
    /// The field that was absent or empty (`accessJwt` or `did`).
    pub field: &'static str,
    /// Raw response body, for diagnostics.
    pub body: String,
}

/// A post already holds the maximum number of image attachments.
#[derive(Debug, Error)]
#[error("post already has {limit} images attached")]
pub struct CapacityError {
    /// The attachment limit that was hit.
    pub limit: usize,
}

/// A non-success XRPC response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// XRPC error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl ProtocolError {
    pub(crate) fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid host URL format.
    #[error("invalid host URL '{value}': {reason}")]
    Host { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_code_and_message() {
        let err = ProtocolError::new(
            400,
            Some("InvalidRequest".to_string()),
            Some("bad record".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 400 [InvalidRequest]: bad record");
    }

    #[test]
    fn protocol_error_display_status_only() {
        let err = ProtocolError::new(502, None, None);
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn auth_error_carries_raw_body() {
        let err = AuthError {
            field: "accessJwt",
            body: r#"{"error":"AuthenticationRequired"}"#.to_string(),
        };
        assert!(err.to_string().contains("accessJwt"));
        assert!(err.to_string().contains("AuthenticationRequired"));
    }
}
