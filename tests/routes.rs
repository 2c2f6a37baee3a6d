//! Router tests for paths that are decided before any SQL runs. The pool is lazy and points
//! at a database that is never contacted.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use jobly::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app(body_limit: usize) -> Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost/jobly_never_used")
        .unwrap();
    app(
        AppState {
            pool,
            schema: "public".into(),
        },
        body_limit,
    )
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => {
            let bytes = serde_json::to_vec(&v).unwrap();
            builder
                .header("content-type", "application/json")
                .header("content-length", bytes.len())
                .body(Body::from(bytes))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_and_version() {
    let (status, body) = send(test_app(1024), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(test_app(1024), "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("jobly"));
}

#[tokio::test]
async fn empty_patch_is_bad_request() {
    let (status, body) = send(test_app(1024), "PATCH", "/jobs/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("bad_request"));
    assert_eq!(body["error"]["message"], json!("no data to update"));
}

#[tokio::test]
async fn patch_outside_allow_list_is_rejected() {
    let (status, body) =
        send(test_app(1024), "PATCH", "/companies/c1", Some(json!({"handle": "c-new"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("validation_error"));

    let (status, _) =
        send(test_app(1024), "PATCH", "/users/u1", Some(json!({"username": "other"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_job_id_is_bad_request() {
    let (status, _) = send(test_app(1024), "PATCH", "/jobs/abc", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(test_app(1024), "POST", "/users/u1/jobs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_filter_values_are_rejected() {
    let (status, body) = send(test_app(1024), "GET", "/jobs?minSalary=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], json!("validation: minSalary must be an integer"));

    let (status, _) = send(test_app(1024), "GET", "/companies?maxEmployees=-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_missing_or_extra_fields() {
    let (status, _) = send(
        test_app(1024),
        "POST",
        "/jobs",
        Some(json!({"title": "new", "salary": 10000})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        test_app(1024),
        "POST",
        "/jobs",
        Some(json!({"title": "new", "salary": 10000, "equity": "0", "companyHandle": "c2", "logoUrl": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(test_app(1024), "POST", "/companies", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let big = json!({"description": "x".repeat(200)});
    let (status, _) = send(test_app(64), "PATCH", "/companies/c1", Some(big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
