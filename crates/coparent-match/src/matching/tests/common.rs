use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::matching::{
    compatibility_router, CompatibilityEngine, CompatibilityService, InMemoryProfileDirectory,
    LookingFor, ProfileId, ProfileRecord,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn engine() -> CompatibilityEngine {
    CompatibilityEngine::with_reference_date(today())
}

pub(super) fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|item| item.to_string()).collect())
}

/// Viewer with every factor populated.
pub(super) fn rich_viewer() -> ProfileRecord {
    ProfileRecord {
        qualities: strings(&["Stability", "Education", "Humor"]),
        parenting_philosophy: Some("Consistent routines with gentle discipline".to_string()),
        involvement_percent: Some(50),
        smoking: Some("never".to_string()),
        drinking: Some("socially".to_string()),
        exercise: Some("daily".to_string()),
        languages: strings(&["English", "French"]),
        looking_for: Some(LookingFor::Many(vec!["co-parenting".to_string()])),
        interests: strings(&["hiking", "cooking"]),
        causes: strings(&["education"]),
        city: Some("Paris".to_string()),
        country: Some("France".to_string()),
        open_to_relocation: Some(false),
        birth_date: NaiveDate::from_ymd_opt(1988, 3, 2),
        ..Default::default()
    }
}

/// Candidate using the legacy field names.
pub(super) fn legacy_candidate() -> ProfileRecord {
    ProfileRecord {
        values: strings(&["Stability", "Nature"]),
        parenting_philosophy: Some("Gentle discipline and outdoor play".to_string()),
        involvement: Some("60/40 custody".to_string()),
        smoking: Some("never".to_string()),
        alcohol: Some("socially".to_string()),
        exercise: Some("several_weekly".to_string()),
        languages: strings(&["English"]),
        looking_for: Some(LookingFor::One("co-parenting".to_string())),
        city: Some("paris".to_string()),
        country: Some("france".to_string()),
        age: Some(39),
        ..Default::default()
    }
}

pub(super) fn service_with(
    entries: Vec<(&str, ProfileRecord)>,
) -> Arc<CompatibilityService<InMemoryProfileDirectory>> {
    let directory = InMemoryProfileDirectory::new();
    for (id, record) in entries {
        crate::matching::ProfileDirectory::upsert(&directory, ProfileId(id.to_string()), record)
            .expect("seed profile");
    }
    Arc::new(CompatibilityService::with_engine(
        Arc::new(directory),
        engine(),
    ))
}

pub(super) async fn send(
    service: Arc<CompatibilityService<InMemoryProfileDirectory>>,
    request: Request<Body>,
) -> Response {
    use tower::ServiceExt;

    compatibility_router(service)
        .oneshot(request)
        .await
        .expect("router responds")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
