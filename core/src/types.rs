//! Domain DTOs for the time-tracking API.
//!
//! # Design
//! Response types mirror the wire schema with every field optional — the
//! server omits fields freely depending on endpoint and account plan.
//! Request types use `skip_serializing_if` so omitted fields never reach the
//! wire, keeping "absent" distinct from a zero value. The serialization
//! mapping is declared field by field; no blanket renames.
//!
//! Query-option types are not serde types at all: they encode to ordered
//! `(key, value)` pairs, and only fields set to a non-default value produce
//! a pair.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::datetime::Timestamp;

/// A tracked block of time against a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskReference>,
    /// Team-space (workspace) id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    /// Tracked milliseconds; negative while a timer is running. Kept as an
    /// arbitrary-precision number because the server quotes it in some
    /// responses and values exceed what an `f64` can hold exactly.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    /// Last-modified instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Client that recorded the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_location: Option<TaskLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_tags: Option<Vec<TaskTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_url: Option<String>,
}

/// Identifying slice of the task an entry is tracked against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-defined task id, present when the workspace uses custom ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub status_type: Option<String>,
}

/// The user a time entry belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(
        default,
        rename = "profilePicture",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture: Option<String>,
}

/// Where the tracked task lives in the workspace hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_name: Option<String>,
}

/// A tag attached to the tracked task itself (distinct from the entry's own
/// `tags`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<i64>,
}

/// Filters for listing time entries. Fields left at their defaults are
/// omitted from the query string entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryQueryOptions {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    /// Restrict to a single user's entries.
    pub assignee: Option<i64>,
    pub include_task_tags: bool,
    pub include_location_names: bool,
    pub space_id: Option<i64>,
    pub folder_id: Option<i64>,
    pub list_id: Option<i64>,
    pub task_id: Option<i64>,
    /// Interpret `task_id` as a user-defined task id; requires `team_id`.
    pub custom_task_ids: bool,
    pub team_id: Option<i64>,
}

impl TimeEntryQueryOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.millis().to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.millis().to_string()));
        }
        if let Some(assignee) = self.assignee {
            pairs.push(("assignee", assignee.to_string()));
        }
        if self.include_task_tags {
            pairs.push(("include_task_tags", "true".to_string()));
        }
        if self.include_location_names {
            // Upstream spells this key without the second underscore.
            pairs.push(("includelocation_names", "true".to_string()));
        }
        if let Some(id) = self.space_id {
            pairs.push(("space_id", id.to_string()));
        }
        if let Some(id) = self.folder_id {
            pairs.push(("folder_id", id.to_string()));
        }
        if let Some(id) = self.list_id {
            pairs.push(("list_id", id.to_string()));
        }
        if let Some(id) = self.task_id {
            pairs.push(("task_id", id.to_string()));
        }
        if self.custom_task_ids {
            pairs.push(("custom_task_ids", "true".to_string()));
        }
        if let Some(id) = self.team_id {
            pairs.push(("team_id", id.to_string()));
        }
        pairs
    }
}

/// Options for the current-timer lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentTimeEntryOptions {
    /// Look up another user's running timer instead of the authenticated
    /// user's.
    pub assignee: Option<i64>,
}

impl CurrentTimeEntryOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self.assignee {
            Some(assignee) => vec![("assignee", assignee.to_string())],
            None => Vec::new(),
        }
    }
}

/// Payload for starting a new running timer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartTimerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Task to track against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
}

/// How [`TimeEntryUpdateRequest::tags`] is applied to the entry's existing
/// tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAction {
    Replace,
    Add,
    Remove,
}

/// Payload for mutating an existing time entry. Omitted fields are left
/// unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_action: Option<TagAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<bool>,
    /// New tracked duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Accept a duration from either a JSON number or a numeric JSON string,
/// preserving full integer precision either way.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Number),
        String(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::String(s)) => serde_json::from_str(&s)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid numeric string: {s:?}"))),
    }
}
