//! Error types for the time-tracking API client.
//!
//! # Design
//! Non-2xx responses land in `HttpError` with the raw status code and body;
//! the client does not interpret them further, so rate-limit and auth
//! signals stay visible to the caller. Transport failures are produced by
//! [`Transport`](crate::http::Transport) implementations and are not retried
//! here. Nothing is logged or swallowed; every error propagates unmodified.

use std::fmt;

/// Errors returned by `TimeEntriesClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON. Fails before any
    /// network I/O.
    SerializationError(String),

    /// The transport could not complete the exchange: connection or DNS
    /// failure, timeout, or cancellation.
    TransportError(String),

    /// The server returned a non-2xx status. Carries the raw body for
    /// inspection.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::TransportError(msg) => {
                write!(f, "transport failed: {msg}")
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
