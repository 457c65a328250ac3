//! Typed client core for a project-management API's time-tracking endpoints:
//! list entries, look up the running timer, start/stop a timer, update an
//! entry.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller either executes
//! the HTTP round-trip itself between `build_*` and `parse_*`, or supplies a
//! [`Transport`] so each endpoint runs as a single call. Authentication,
//! retries, rate limiting and pagination belong to the transport layer, not
//! here.
//!
//! # Design
//! - `TimeEntriesClient` is stateless — it holds only `base_url` — and is
//!   safe for concurrent use.
//! - Every response payload arrives wrapped in a top-level `data` field; the
//!   envelope is unwrapped in `client` and never reaches callers.
//! - Timestamps and durations cross the wire as millisecond values that may
//!   be quoted; `datetime` and `types` keep them lossless.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod datetime;
pub mod error;
pub mod http;
pub mod types;

pub use client::TimeEntriesClient;
pub use datetime::Timestamp;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{
    CurrentTimeEntryOptions, StartTimerRequest, TagAction, TaskLocation, TaskReference,
    TaskStatus, TaskTag, TimeEntry, TimeEntryQueryOptions, TimeEntryUpdateRequest, User,
};
