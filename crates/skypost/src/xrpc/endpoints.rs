//! XRPC endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

/// com.atproto.server.createSession
pub(crate) const CREATE_SESSION: &str = "com.atproto.server.createSession";

/// com.atproto.repo.uploadBlob
pub(crate) const UPLOAD_BLOB: &str = "com.atproto.repo.uploadBlob";

/// com.atproto.repo.createRecord
pub(crate) const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

/// Request body for createSession.
#[derive(Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Response from uploadBlob. The blob descriptor is opaque; it is
/// round-tripped verbatim into the post record.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadBlobResponse {
    pub blob: serde_json::Value,
}

/// Request body for createRecord.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRecordRequest<'a, R> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub record: &'a R,
}

/// Response from createRecord.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateRecordResponse {
    pub uri: String,
    pub cid: String,
}

/// XRPC error response format.
#[derive(Debug, Deserialize)]
pub(crate) struct XrpcErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
