use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A stored time entry, in the wire shape the client expects: timestamps and
/// durations are epoch-millisecond strings, and stopped entries carry `end`
/// and `duration` while running ones don't.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub wid: String,
    pub billable: bool,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskRef>,
    pub source: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
}

#[derive(Deserialize)]
pub struct StartTimerRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub billable: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateTimeEntryRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub tag_action: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub tid: Option<String>,
    #[serde(default)]
    pub billable: Option<bool>,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Every endpoint wraps its payload in a `data` field.
#[derive(Serialize)]
struct Data<T> {
    data: T,
}

/// Stopped entries in insertion order, plus at most one running timer.
#[derive(Default)]
pub struct Timesheet {
    pub entries: Vec<TimeEntry>,
    pub running: Option<TimeEntry>,
}

pub type Db = Arc<RwLock<Timesheet>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Timesheet::default()));
    Router::new()
        .route("/team/{team_id}/time_entries", get(list_entries))
        .route("/team/{team_id}/time_entries/current", get(current_entry))
        .route("/team/{team_id}/time_entries/start", post(start_timer))
        .route("/team/{team_id}/time_entries/stop", post(stop_timer))
        .route("/team/{team_id}/time_entries/{entry_id}", put(update_entry))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Close a running entry at `end_ms`, deriving its duration.
fn finish(mut entry: TimeEntry, end_ms: i64) -> TimeEntry {
    let start_ms: i64 = entry.start.parse().unwrap_or(end_ms);
    entry.end = Some(end_ms.to_string());
    entry.duration = Some((end_ms - start_ms).to_string());
    entry
}

async fn list_entries(State(db): State<Db>) -> Json<Data<Vec<TimeEntry>>> {
    let sheet = db.read().await;
    Json(Data {
        data: sheet.entries.clone(),
    })
}

async fn current_entry(State(db): State<Db>) -> Json<Data<Option<TimeEntry>>> {
    let sheet = db.read().await;
    Json(Data {
        data: sheet.running.clone(),
    })
}

async fn start_timer(
    State(db): State<Db>,
    Path(team_id): Path<String>,
    Json(input): Json<StartTimerRequest>,
) -> Json<Data<TimeEntry>> {
    let mut sheet = db.write().await;
    // Starting over an already-running timer stops the old one first.
    if let Some(previous) = sheet.running.take() {
        let stopped = finish(previous, now_millis());
        sheet.entries.push(stopped);
    }
    let entry = TimeEntry {
        id: Uuid::new_v4(),
        wid: team_id,
        billable: input.billable.unwrap_or(false),
        start: now_millis().to_string(),
        end: None,
        duration: None,
        description: input.description.unwrap_or_default(),
        tags: input.tags.unwrap_or_default(),
        task: input.tid.map(|id| TaskRef { id }),
        source: "timetrack".to_string(),
    };
    sheet.running = Some(entry.clone());
    Json(Data { data: entry })
}

async fn stop_timer(State(db): State<Db>) -> Json<Data<Option<TimeEntry>>> {
    let mut sheet = db.write().await;
    match sheet.running.take() {
        Some(entry) => {
            let stopped = finish(entry, now_millis());
            sheet.entries.push(stopped.clone());
            Json(Data {
                data: Some(stopped),
            })
        }
        None => Json(Data { data: None }),
    }
}

async fn update_entry(
    State(db): State<Db>,
    Path((_team_id, entry_id)): Path<(String, Uuid)>,
    Json(input): Json<UpdateTimeEntryRequest>,
) -> Result<Json<Data<TimeEntry>>, StatusCode> {
    let mut guard = db.write().await;
    let sheet = &mut *guard;
    let entry = sheet
        .running
        .iter_mut()
        .chain(sheet.entries.iter_mut())
        .find(|e| e.id == entry_id)
        .ok_or(StatusCode::NOT_FOUND)?;

    if let Some(description) = input.description {
        entry.description = description;
    }
    if let Some(tags) = input.tags {
        match input.tag_action.as_deref() {
            Some("add") => {
                for tag in tags {
                    if !entry.tags.contains(&tag) {
                        entry.tags.push(tag);
                    }
                }
            }
            Some("remove") => entry.tags.retain(|t| !tags.contains(t)),
            // "replace" and unspecified both overwrite.
            _ => entry.tags = tags,
        }
    }
    if let Some(billable) = input.billable {
        entry.billable = billable;
    }
    if let Some(start) = input.start {
        entry.start = start;
    }
    if let Some(end) = input.end {
        entry.end = Some(end);
    }
    if let Some(duration) = input.duration {
        entry.duration = Some(duration.to_string());
    }
    if let Some(tid) = input.tid {
        entry.task = Some(TaskRef { id: tid });
    }
    Ok(Json(Data {
        data: entry.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_entry() -> TimeEntry {
        TimeEntry {
            id: Uuid::nil(),
            wid: "9001".to_string(),
            billable: false,
            start: "1719830000000".to_string(),
            end: None,
            duration: None,
            description: "Pairing".to_string(),
            tags: vec!["focus".to_string()],
            task: Some(TaskRef {
                id: "abc123".to_string(),
            }),
            source: "timetrack".to_string(),
        }
    }

    #[test]
    fn running_entry_omits_end_and_duration() {
        let json = serde_json::to_value(running_entry()).unwrap();
        assert_eq!(json["start"], "1719830000000");
        assert_eq!(json["task"]["id"], "abc123");
        assert!(json.get("end").is_none());
        assert!(json.get("duration").is_none());
    }

    #[test]
    fn finished_entry_carries_millis_strings() {
        let stopped = finish(running_entry(), 1_719_833_600_000);
        assert_eq!(stopped.end.as_deref(), Some("1719833600000"));
        assert_eq!(stopped.duration.as_deref(), Some("3600000"));
    }

    #[test]
    fn start_request_fields_all_optional() {
        let input: StartTimerRequest = serde_json::from_str("{}").unwrap();
        assert!(input.description.is_none());
        assert!(input.tags.is_none());
        assert!(input.tid.is_none());
        assert!(input.billable.is_none());
    }

    #[test]
    fn update_request_fields_all_optional() {
        let input: UpdateTimeEntryRequest = serde_json::from_str("{}").unwrap();
        assert!(input.description.is_none());
        assert!(input.tag_action.is_none());
        assert!(input.duration.is_none());
    }

    #[test]
    fn null_running_timer_serializes_as_null_data() {
        let body = serde_json::to_string(&Data::<Option<TimeEntry>> { data: None }).unwrap();
        assert_eq!(body, r#"{"data":null}"#);
    }
}
