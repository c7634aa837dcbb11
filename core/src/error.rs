//! Error types for the todo client.
//!
//! # Design
//! `Unauthorized` gets its own variant because the controller reacts to it
//! differently from every other failure: a rejected bearer token ends the
//! session. 403 and 404 are split out the same way so callers can match on
//! them; everything else non-2xx lands in `HttpError` with the raw body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by hosts executing
/// requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401; the bearer token is missing, expired or unknown.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned 403, e.g. the todo belongs to another user.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Text shown to the user when the server's own message should be
    /// surfaced verbatim.
    pub fn server_text(&self) -> String {
        match self {
            ApiError::Forbidden(body) | ApiError::HttpError { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Failure reading or writing durable client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}
