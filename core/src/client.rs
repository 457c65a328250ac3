//! Stateless HTTP request builder and response parser for the time-tracking
//! endpoints.
//!
//! # Design
//! `TimeEntriesClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the matching one-call method runs build, send and parse
//! through a caller-supplied [`Transport`]. Either way a call is one
//! independent HTTP exchange — no retries, no local mutation, so the client
//! is safe to share across threads.
//!
//! Every response payload arrives wrapped in a top-level `data` field; the
//! envelope is unwrapped here and never reaches callers.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{
    CurrentTimeEntryOptions, StartTimerRequest, TimeEntry, TimeEntryQueryOptions,
    TimeEntryUpdateRequest,
};

#[derive(Deserialize)]
struct ListEnvelope {
    // Absent and null both mean "no entries".
    #[serde(default)]
    data: Option<Vec<TimeEntry>>,
}

#[derive(Deserialize)]
struct EntryEnvelope {
    #[serde(default)]
    data: Option<TimeEntry>,
}

/// Stateless client for the time-tracking endpoints.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Authentication headers, retry policy, rate limiting
/// and pagination belong to the transport layer.
#[derive(Debug, Clone)]
pub struct TimeEntriesClient {
    base_url: String,
}

impl TimeEntriesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_time_entries(
        &self,
        team_id: &str,
        options: &TimeEntryQueryOptions,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: with_query(
                format!("{}/team/{team_id}/time_entries", self.base_url),
                &options.query_pairs(),
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_time_entries(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        check_status(&response)?;
        let envelope: ListEnvelope = decode(&response.body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET team/{team_id}/time_entries` — entries matching `options`, in
    /// server order.
    pub fn list_time_entries(
        &self,
        transport: &dyn Transport,
        team_id: &str,
        options: &TimeEntryQueryOptions,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        let request = self.build_list_time_entries(team_id, options);
        self.parse_list_time_entries(transport.send(&request)?)
    }

    pub fn build_current_time_entry(
        &self,
        team_id: &str,
        options: &CurrentTimeEntryOptions,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: with_query(
                format!("{}/team/{team_id}/time_entries/current", self.base_url),
                &options.query_pairs(),
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_current_time_entry(
        &self,
        response: HttpResponse,
    ) -> Result<Option<TimeEntry>, ApiError> {
        check_status(&response)?;
        let envelope: EntryEnvelope = decode(&response.body)?;
        Ok(envelope.data)
    }

    /// `GET team/{team_id}/time_entries/current` — the running timer, or
    /// `None` when nothing is being tracked.
    pub fn current_time_entry(
        &self,
        transport: &dyn Transport,
        team_id: &str,
        options: &CurrentTimeEntryOptions,
    ) -> Result<Option<TimeEntry>, ApiError> {
        let request = self.build_current_time_entry(team_id, options);
        self.parse_current_time_entry(transport.send(&request)?)
    }

    pub fn build_start_timer(
        &self,
        team_id: &str,
        request: &StartTimerRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/team/{team_id}/time_entries/start", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_start_timer(&self, response: HttpResponse) -> Result<TimeEntry, ApiError> {
        check_status(&response)?;
        let envelope: EntryEnvelope = decode(&response.body)?;
        envelope
            .data
            .ok_or_else(|| ApiError::DeserializationError("response carries no entry".to_string()))
    }

    /// `POST team/{team_id}/time_entries/start` — begins a running timer and
    /// returns the created entry.
    pub fn start_timer(
        &self,
        transport: &dyn Transport,
        team_id: &str,
        request: &StartTimerRequest,
    ) -> Result<TimeEntry, ApiError> {
        let request = self.build_start_timer(team_id, request)?;
        self.parse_start_timer(transport.send(&request)?)
    }

    pub fn build_stop_timer(&self, team_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/team/{team_id}/time_entries/stop", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_stop_timer(&self, response: HttpResponse) -> Result<Option<TimeEntry>, ApiError> {
        check_status(&response)?;
        let envelope: EntryEnvelope = decode(&response.body)?;
        Ok(envelope.data)
    }

    /// `POST team/{team_id}/time_entries/stop` — stops the running timer and
    /// returns the stopped entry, or `None` when nothing was running.
    pub fn stop_timer(
        &self,
        transport: &dyn Transport,
        team_id: &str,
    ) -> Result<Option<TimeEntry>, ApiError> {
        let request = self.build_stop_timer(team_id);
        self.parse_stop_timer(transport.send(&request)?)
    }

    pub fn build_update_time_entry(
        &self,
        team_id: &str,
        time_entry_id: &str,
        request: &TimeEntryUpdateRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!(
                "{}/team/{team_id}/time_entries/{time_entry_id}",
                self.base_url
            ),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// Succeeds on any 2xx without reading the body — the server echoes the
    /// updated entry but callers that need it should re-fetch.
    pub fn parse_update_time_entry(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// `PUT team/{team_id}/time_entries/{time_entry_id}` — mutates an
    /// existing entry.
    pub fn update_time_entry(
        &self,
        transport: &dyn Transport,
        team_id: &str,
        time_entry_id: &str,
        request: &TimeEntryUpdateRequest,
    ) -> Result<(), ApiError> {
        let request = self.build_update_time_entry(team_id, time_entry_id, request)?;
        self.parse_update_time_entry(transport.send(&request)?)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Append encoded pairs as a query string. Pair values come from the options
/// types and contain only decimal digits or `true`, so no escaping is needed.
fn with_query(url: String, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return url;
    }
    let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{url}?{}", query.join("&"))
}

/// Treat the whole 2xx range as success; everything else is surfaced raw
/// with its exact status code.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
