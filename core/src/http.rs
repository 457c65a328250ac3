//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller either executes the exchange itself
//! or hands the client a [`Transport`] so an operation runs build, send and
//! parse in one call. This separation keeps the core deterministic and easy
//! to test.
//!
//! All fields use owned types (`String`, `Vec`) so values outlive the builder
//! that produced them.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// An HTTP request described as plain data.
///
/// Built by `TimeEntriesClient::build_*` methods. The `url` is absolute and
/// already carries any query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed after executing an `HttpRequest`, then passed to
/// `TimeEntriesClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes a single HTTP exchange on behalf of the client.
///
/// Implementations own connection handling, authentication headers, timeouts
/// and cancellation. A failed exchange (connect or DNS failure, timeout,
/// abort) maps to [`ApiError::TransportError`]; a completed exchange returns
/// the response as data regardless of status code, so the client interprets
/// non-2xx statuses itself.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}
