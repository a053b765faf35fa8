use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use echo_service::{build_router, ServiceOptions};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(&ServiceOptions::default())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn echo_reflects_message() {
    let response = app()
        .oneshot(post_json("/echo", r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(json_body(response).await, json!({"echo": "hello"}));
}

#[tokio::test]
async fn echo_is_reachable_under_api_prefix() {
    let response = app()
        .oneshot(post_json("/api/echo", r#"{"message": "proxied"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"echo": "proxied"}));
}

#[tokio::test]
async fn echo_accepts_empty_and_non_string_messages() {
    let response = app()
        .oneshot(post_json("/echo", r#"{"message": ""}"#))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({"echo": ""}));

    let response = app()
        .oneshot(post_json("/echo", r#"{"message": {"nested": [1, 2]}}"#))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({"echo": {"nested": [1, 2]}}));
}

#[tokio::test]
async fn missing_message_is_rejected() {
    for body in ["{}", r#"{"text": "hello"}"#, "null", "[]", "not json", ""] {
        let response = app().oneshot(post_json("/echo", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(
            json_body(response).await,
            json!({"error": "No message provided"}),
            "body: {:?}",
            body
        );
    }
}

#[tokio::test]
async fn root_reports_running() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Echo API is running!");
}

#[tokio::test]
async fn echo_only_accepts_post() {
    let response = app()
        .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn static_dir_serves_unrouted_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>League Pick Rate History</h1>").unwrap();

    let options = ServiceOptions {
        static_dir: Some(dir.path().to_path_buf()),
        ..ServiceOptions::default()
    };
    let response = build_router(&options)
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>League Pick Rate History</h1>");
}
