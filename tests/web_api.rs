// HTTP API tests: drive the Axum router in-process with tower's oneshot.

#![cfg(feature = "web")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use tracer::config::Config;
use tracer::web::{build_router, AppState};

const BOUNDARY: &str = "tracer-test-boundary";

fn app() -> Router {
    build_router(AppState::new(Config::default()))
}

/// Build a multipart body with one part per (field, filename, content).
fn multipart(parts: &[(&str, &str, &[u8])]) -> Body {
    let mut body = Vec::new();
    for (field, filename, content) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn analyze_request(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn home_reports_online() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, json) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "online");
}

#[tokio::test]
async fn analyze_identical_files() {
    let body = multipart(&[
        ("files", "a.txt", b"the cat sat on the mat".as_slice()),
        ("files", "b.txt", b"the cat sat on the mat".as_slice()),
        ("files", "c.txt", b"completely unrelated words here".as_slice()),
    ]);
    let (status, json) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["total_files"], 3);
    assert_eq!(json["comparisons"], 1);
    assert_eq!(json["files_received"], 3);
    assert_eq!(json["results"][0]["file1"], "a.txt");
    assert_eq!(json["results"][0]["file2"], "b.txt");
    assert_eq!(json["results"][0]["similarity"], 100.0);
}

#[tokio::test]
async fn analyze_lists_skipped_files() {
    let body = multipart(&[
        ("files", "a.txt", b"shared essay text".as_slice()),
        ("files", "photo.jpg", b"\xFF\xD8\xFF".as_slice()),
        ("files", "b.txt", b"shared essay text".as_slice()),
    ]);
    let (status, json) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["skipped"][0]["filename"], "photo.jpg");
    assert_eq!(json["skipped"][0]["reason"], "unsupported file type: jpg");
}

#[tokio::test]
async fn analyze_without_files_field_is_bad_request() {
    let body = multipart(&[("attachment", "a.txt", b"text".as_slice())]);
    let (status, json) = send(app(), analyze_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No files uploaded");
}

#[tokio::test]
async fn analyze_single_file_is_bad_request() {
    let body = multipart(&[("files", "a.txt", b"text".as_slice())]);
    let (status, json) = send(app(), analyze_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("at least 2"));
}

#[tokio::test]
async fn analyze_too_many_files_is_bad_request() {
    let names: Vec<String> = (0..101).map(|i| format!("{i}.txt")).collect();
    let parts: Vec<(&str, &str, &[u8])> = names
        .iter()
        .map(|n| ("files", n.as_str(), b"same".as_slice()))
        .collect();
    let (status, json) = send(app(), analyze_request(multipart(&parts))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Maximum of 100"));
}

#[tokio::test]
async fn analyze_insufficient_text_is_bad_request() {
    let body = multipart(&[
        ("files", "a.txt", b"real text".as_slice()),
        ("files", "b.txt", b"   ".as_slice()),
    ]);
    let (status, json) = send(app(), analyze_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Could not extract text"));
}

#[tokio::test]
async fn analyze_unvectorizable_text_is_server_error() {
    // Both files have text, but nothing that tokenizes into a term.
    let body = multipart(&[
        ("files", "a.txt", b"!!! ???".as_slice()),
        ("files", "b.txt", b"... ---".as_slice()),
    ]);
    let (status, json) = send(app(), analyze_request(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Error computing similarities");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/analyze")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
