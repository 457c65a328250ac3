use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, TimeEntry};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Unwrap the `data` envelope into a typed entry.
async fn data_entry(response: axum::response::Response) -> TimeEntry {
    let value = body_json(response).await;
    serde_json::from_value(value["data"].clone()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_entries_empty() {
    let app = app();
    let resp = app
        .oneshot(get_request("/team/9001/time_entries"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let value = body_json(resp).await;
    assert_eq!(value, serde_json::json!({"data": []}));
}

// --- current ---

#[tokio::test]
async fn current_without_running_timer_is_null_data() {
    let app = app();
    let resp = app
        .oneshot(get_request("/team/9001/time_entries/current"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let value = body_json(resp).await;
    assert!(value["data"].is_null());
}

// --- start ---

#[tokio::test]
async fn start_timer_creates_running_entry() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/team/9001/time_entries/start",
            r#"{"description":"work","tid":"abc123","billable":true,"tags":["focus"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entry = data_entry(resp).await;
    assert_eq!(entry.description, "work");
    assert_eq!(entry.wid, "9001");
    assert_eq!(entry.task.unwrap().id, "abc123");
    assert!(entry.billable);
    assert_eq!(entry.tags, vec!["focus".to_string()]);
    assert_eq!(entry.source, "timetrack");
    assert!(entry.end.is_none());
    assert!(entry.duration.is_none());
}

#[tokio::test]
async fn start_timer_rejects_mistyped_fields() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/team/9001/time_entries/start",
            r#"{"tags":5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- stop ---

#[tokio::test]
async fn stop_without_running_timer_returns_null_data() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/team/9001/time_entries/stop", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let value = body_json(resp).await;
    assert!(value["data"].is_null());
}

// --- update ---

#[tokio::test]
async fn update_unknown_entry_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/team/9001/time_entries/00000000-0000-0000-0000-000000000000",
            r#"{"description":"nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_bad_entry_id_returns_400() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/team/9001/time_entries/not-an-id",
            r#"{"description":"nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full timer lifecycle ---

#[tokio::test]
async fn timer_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // start a timer
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/team/9001/time_entries/start",
            r#"{"description":"morning work","tags":["deep-work"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let started = data_entry(resp).await;
    let id = started.id;

    // current — reports the running timer
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/team/9001/time_entries/current"))
        .await
        .unwrap();
    let current = data_entry(resp).await;
    assert_eq!(current.id, id);

    // list — running entries are not listed yet
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/team/9001/time_entries"))
        .await
        .unwrap();
    let value = body_json(resp).await;
    assert_eq!(value["data"].as_array().unwrap().len(), 0);

    // stop — entry moves into the list with end and duration set
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/team/9001/time_entries/stop", ""))
        .await
        .unwrap();
    let stopped = data_entry(resp).await;
    assert_eq!(stopped.id, id);
    assert!(stopped.end.is_some());
    let tracked: i64 = stopped.duration.unwrap().parse().unwrap();
    assert!(tracked >= 0);

    // current after stop — null
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/team/9001/time_entries/current"))
        .await
        .unwrap();
    assert!(body_json(resp).await["data"].is_null());

    // update — replace description and tags
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/team/9001/time_entries/{id}"),
            r#"{"description":"reviewed","tags":["review"],"tag_action":"replace","duration":3600000}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = data_entry(resp).await;
    assert_eq!(updated.description, "reviewed");
    assert_eq!(updated.tags, vec!["review".to_string()]);
    assert_eq!(updated.duration.as_deref(), Some("3600000"));

    // update — tag_action add keeps existing tags
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/team/9001/time_entries/{id}"),
            r#"{"tags":["billing"],"tag_action":"add"}"#,
        ))
        .await
        .unwrap();
    let updated = data_entry(resp).await;
    assert_eq!(
        updated.tags,
        vec!["review".to_string(), "billing".to_string()]
    );

    // update — tag_action remove drops only the named tags
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/team/9001/time_entries/{id}"),
            r#"{"tags":["review"],"tag_action":"remove"}"#,
        ))
        .await
        .unwrap();
    let updated = data_entry(resp).await;
    assert_eq!(updated.tags, vec!["billing".to_string()]);

    // starting again while a timer runs auto-stops the old one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/team/9001/time_entries/start",
            r#"{"description":"first"}"#,
        ))
        .await
        .unwrap();
    let first = data_entry(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/team/9001/time_entries/start",
            r#"{"description":"second"}"#,
        ))
        .await
        .unwrap();
    let second = data_entry(resp).await;

    // list — insertion order: the updated entry, then the auto-stopped one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/team/9001/time_entries"))
        .await
        .unwrap();
    let value = body_json(resp).await;
    let listed: Vec<TimeEntry> =
        serde_json::from_value(value["data"].clone()).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[1].id, first.id);
    assert!(listed[1].end.is_some());

    // current — the second timer is still running
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/team/9001/time_entries/current"))
        .await
        .unwrap();
    assert_eq!(data_entry(resp).await.id, second.id);
}
