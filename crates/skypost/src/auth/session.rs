//! Session exchange and authenticated repository operations.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{AuthError, Error};
use crate::post::PostRef;
use crate::types::Did;
use crate::xrpc::{
    CREATE_RECORD, CREATE_SESSION, CreateRecordRequest, CreateRecordResponse,
    CreateSessionRequest, UPLOAD_BLOB, UploadBlobResponse, XrpcClient, XrpcError,
};

use super::credentials::Credentials;
use super::tokens::AccessToken;

/// An authenticated session with a PDS.
///
/// Obtained via [`Session::login()`] and scoped to a single post operation:
/// never persisted, never refreshed. If the access token expires between the
/// exchange and a later upload or submission, that call fails and the
/// enclosing operation fails with it.
///
/// # Example
///
/// ```no_run
/// use skypost::{Credentials, Host, Session};
///
/// # async fn example() -> Result<(), skypost::Error> {
/// let host = Host::new("https://bsky.social")?;
/// let creds = Credentials::new(host, "alice.bsky.social", "app-password");
/// let session = Session::login(&creds).await?;
///
/// println!("Logged in as: {}", session.did());
/// # Ok(())
/// # }
/// ```
pub struct Session {
    client: XrpcClient,
    did: Did,
    access_token: AccessToken,
}

impl Session {
    /// Exchange credentials for a session.
    ///
    /// A single createSession call. The response must carry both a non-empty
    /// `accessJwt` and a non-empty `did`; anything else fails with
    /// [`Error::Auth`] carrying the raw response body. The body is inspected
    /// regardless of HTTP status, so a rejected login surfaces the server's
    /// error description rather than a bare status code.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] on an incomplete response, [`Error::Transport`] if the
    /// host is unreachable.
    #[instrument(
        skip(credentials),
        fields(host = %credentials.host(), identifier = credentials.identifier())
    )]
    pub async fn login(credentials: &Credentials) -> Result<Self, Error> {
        info!("Creating session");

        let client = XrpcClient::new(credentials.host().clone());
        let request = CreateSessionRequest {
            identifier: credentials.identifier(),
            password: credentials.password(),
        };

        let body = client.procedure_unchecked(CREATE_SESSION, &request).await?;

        let access_jwt = require_field(&body, "accessJwt")?;
        let did = require_field(&body, "did")?;
        let did = Did::new(did);

        debug!(%did, "Session created");

        Ok(Self {
            client,
            did,
            access_token: AccessToken::new(access_jwt),
        })
    }

    /// Returns the account identifier this session acts as.
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// Upload raw JPEG bytes as a blob.
    ///
    /// Returns the opaque blob descriptor exactly as the server sent it, for
    /// embedding in a post record. A non-success response is a fatal
    /// [`Error::Upload`].
    #[instrument(skip(self, bytes), fields(did = %self.did, len = bytes.len()))]
    pub async fn upload_blob(&self, bytes: Vec<u8>) -> Result<serde_json::Value, Error> {
        debug!("Uploading blob");

        let response: UploadBlobResponse = self
            .client
            .upload(UPLOAD_BLOB, bytes, "image/jpeg", self.access_token.as_str())
            .await
            .map_err(XrpcError::into_upload)?;

        Ok(response.blob)
    }

    /// Submit a record to a collection in this session's repository.
    ///
    /// A non-success response is a fatal [`Error::Publish`].
    #[instrument(skip(self, record), fields(did = %self.did, collection))]
    pub async fn create_record<R>(&self, collection: &str, record: &R) -> Result<PostRef, Error>
    where
        R: Serialize,
    {
        debug!("Creating record");

        let request = CreateRecordRequest {
            repo: self.did.as_str(),
            collection,
            record,
        };

        let response: CreateRecordResponse = self
            .client
            .procedure_authed(CREATE_RECORD, &request, self.access_token.as_str())
            .await
            .map_err(XrpcError::into_publish)?;

        Ok(PostRef {
            uri: response.uri,
            cid: response.cid,
        })
    }
}

/// Pull a required non-empty string field out of the createSession response.
fn require_field(body: &serde_json::Value, field: &'static str) -> Result<String, AuthError> {
    body.get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AuthError {
            field,
            body: body.to_string(),
        })
}

// Custom Debug impl that hides the token
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_field_extracts_string() {
        let body = json!({"accessJwt": "token", "did": "did:plc:abc"});
        assert_eq!(require_field(&body, "accessJwt").unwrap(), "token");
    }

    #[test]
    fn require_field_rejects_missing() {
        let body = json!({"error": "AuthenticationRequired"});
        let err = require_field(&body, "accessJwt").unwrap_err();
        assert_eq!(err.field, "accessJwt");
        assert!(err.body.contains("AuthenticationRequired"));
    }

    #[test]
    fn require_field_rejects_empty_string() {
        let body = json!({"did": ""});
        assert!(require_field(&body, "did").is_err());
    }

    #[test]
    fn require_field_rejects_non_string() {
        let body = json!({"did": 42});
        assert!(require_field(&body, "did").is_err());
    }
}
