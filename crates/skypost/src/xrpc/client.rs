//! XRPC HTTP client implementation.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::error::{Error, ProtocolError, TransportError};
use crate::types::Host;

use super::endpoints::XrpcErrorResponse;

/// Per-request timeout. The pipeline has no cancellation mechanism, so every
/// network call must be bounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for XRPC requests against a single host.
#[derive(Debug, Clone)]
pub(crate) struct XrpcClient {
    client: reqwest::Client,
    host: Host,
}

/// Failure of a single XRPC call, before the caller has assigned it a place
/// in the pipeline's error taxonomy.
#[derive(Debug)]
pub(crate) enum XrpcError {
    Transport(TransportError),
    Status(ProtocolError),
}

impl XrpcError {
    /// Classify this failure as a blob-upload error.
    pub(crate) fn into_upload(self) -> Error {
        match self {
            XrpcError::Transport(e) => Error::Transport(e),
            XrpcError::Status(e) => Error::Upload(e),
        }
    }

    /// Classify this failure as a record-submission error.
    pub(crate) fn into_publish(self) -> Error {
        match self {
            XrpcError::Transport(e) => Error::Transport(e),
            XrpcError::Status(e) => Error::Publish(e),
        }
    }
}

impl From<reqwest::Error> for XrpcError {
    fn from(err: reqwest::Error) -> Self {
        XrpcError::Transport(TransportError::from(err))
    }
}

impl XrpcClient {
    /// Create a new XRPC client for the given host.
    pub(crate) fn new(host: Host) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skypost/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { client, host }
    }

    /// Make an unauthenticated XRPC procedure (POST request), returning the
    /// response body as JSON regardless of HTTP status.
    ///
    /// createSession reports failure through the body rather than the status
    /// line, so status interpretation is left to the caller. A body that is
    /// not JSON is returned as a JSON string, preserving it for diagnostics.
    #[instrument(skip(self, body), fields(host = %self.host))]
    pub(crate) async fn procedure_unchecked<B>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<serde_json::Value, TransportError>
    where
        B: Serialize,
    {
        let url = self.host.xrpc_url(method);
        debug!(method, "XRPC procedure (unchecked)");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        trace!(status = %status, "XRPC response");

        let text = response.text().await?;
        Ok(match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(text),
        })
    }

    /// Make an authenticated XRPC procedure (POST request with a JSON body).
    #[instrument(skip(self, body, token), fields(host = %self.host))]
    pub(crate) async fn procedure_authed<B, R>(
        &self,
        method: &str,
        body: &B,
        token: &str,
    ) -> Result<R, XrpcError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.host.xrpc_url(method);
        debug!(method, "XRPC authenticated procedure");

        let response = self
            .client
            .post(&url)
            .json(body)
            .bearer_auth(token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Upload a raw binary body to an XRPC procedure endpoint.
    #[instrument(skip(self, bytes, token), fields(host = %self.host, len = bytes.len()))]
    pub(crate) async fn upload<R>(
        &self,
        method: &str,
        bytes: Vec<u8>,
        content_type: &'static str,
        token: &str,
    ) -> Result<R, XrpcError>
    where
        R: DeserializeOwned,
    {
        let url = self.host.xrpc_url(method);
        debug!(method, content_type, "XRPC binary upload");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .bearer_auth(token)
            .body(bytes)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an XRPC response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, XrpcError> {
        let status = response.status();
        trace!(status = %status, "XRPC response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(XrpcError::Status(self.parse_error_response(response).await))
        }
    }

    /// Parse an XRPC error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<XrpcErrorResponse>().await {
            Ok(error_body) => ProtocolError::new(status, error_body.error, error_body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}
