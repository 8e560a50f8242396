mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_and_version() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({"status": "ok"})));
    let (status, body) = app.send(Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "catalog-api");
}

#[tokio::test]
async fn ready_reflects_store_availability() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    app.store.set_unavailable(true);
    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/products/{id}"].is_object());
}

#[tokio::test]
async fn cors_is_permissive() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/products/")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/users/1")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let resp = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}
