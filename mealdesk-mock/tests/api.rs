// Handler-level tests driven through tower's oneshot

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use mealdesk_mock::{AppState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    build_app(Arc::new(AppState::with_demo_shifts()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_list_hides_inactive_by_default() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/api/shifts", None).await;
    assert_eq!(status, StatusCode::OK);
    let shifts = body["shifts"].as_array().unwrap();
    assert_eq!(shifts.len(), 3);
    assert!(shifts.iter().all(|s| s["isActive"] == true));

    let (_, body) = call(&app, Method::GET, "/api/shifts?includeInactive=true", None).await;
    assert_eq!(body["shifts"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_shift() {
    let app = app();
    let payload = json!({
        "name": "Supper",
        "startTime": "21:00",
        "endTime": "22:00",
        "mealPrice": 20000
    });

    let (status, body) = call(&app, Method::POST, "/api/shifts", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "5");
    assert_eq!(body["isActive"], true);
}

#[tokio::test]
async fn test_create_rejects_invalid_payload() {
    let app = app();
    let payload = json!({
        "name": "Broken",
        "startTime": "25:00",
        "endTime": "22:00"
    });

    let (status, body) = call(&app, Method::POST, "/api/shifts", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1002);
    assert_eq!(body["details"]["field"], "startTime");

    let (_, body) = call(&app, Method::GET, "/api/shifts?includeInactive=true", None).await;
    assert_eq!(body["shifts"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_json_gets_error_body() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/shifts", Some(json!({"name": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_update_shift() {
    let app = app();
    let payload = json!({
        "name": "Lunch",
        "startTime": "12:00",
        "endTime": "14:00",
        "mealPrice": 38000,
        "isActive": false
    });

    let (status, body) = call(&app, Method::PUT, "/api/shifts/2", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "2");
    assert_eq!(body["startTime"], "12:00");
    assert_eq!(body["isActive"], false);

    let (_, body) = call(&app, Method::GET, "/api/shifts", None).await;
    assert_eq!(body["shifts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_unknown_shift_is_404() {
    let app = app();
    let payload = json!({"name": "Lunch", "startTime": "12:00", "endTime": "14:00"});

    let (status, body) = call(&app, Method::PUT, "/api/shifts/99", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["details"]["id"], "99");
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let app = app();

    let (status, mut settings) = call(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["cutoffMode"], "per-shift");
    assert_eq!(settings["cutoffHours"], 6);

    settings["cutoffMode"] = json!("weekly");
    settings["orderableDays"] = json!("1,2,3,4,5,6");
    let (status, saved) = call(&app, Method::PUT, "/api/settings", Some(settings)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["cutoffMode"], "weekly");

    let (_, fetched) = call(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_settings_must_form_a_policy() {
    let app = app();

    let out_of_range = json!({
        "cutoffMode": "per-shift",
        "blacklistStrikes": 3,
        "blacklistDuration": 7,
        "maxOrderDaysAhead": 7,
        "cutoffDays": 0,
        "cutoffHours": 30
    });
    let (status, body) = call(&app, Method::PUT, "/api/settings", Some(out_of_range)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let missing_weekly = json!({
        "cutoffMode": "weekly",
        "blacklistStrikes": 3,
        "blacklistDuration": 7
    });
    let (status, body) = call(&app, Method::PUT, "/api/settings", Some(missing_weekly)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 2001);

    let (_, fetched) = call(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(fetched["cutoffMode"], "per-shift");
}
