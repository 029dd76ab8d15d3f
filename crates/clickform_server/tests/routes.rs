use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use clickform_core::{
    MemoryRecordStore, Record, RecordStore, SqliteRecordStore, SqliteTarget, UploadSink,
};
use clickform_server::{build_router, state::AppState};
use tower::ServiceExt;

const BOUNDARY: &str = "clickform-test-boundary";

fn app_with_store(dir: &Path, store: Arc<dyn RecordStore>, upload_limit: u64) -> Router {
    std::fs::write(dir.join("index.html"), "<h1>index</h1>").unwrap();
    std::fs::write(dir.join("otherpage.html"), "<h1>other</h1>").unwrap();
    let sink = UploadSink::new(dir.join("uploaded_file"), upload_limit);
    build_router(AppState::new(store, sink, dir))
}

fn app(dir: &Path) -> (Router, Arc<MemoryRecordStore>) {
    let store = Arc::new(MemoryRecordStore::new());
    (app_with_store(dir, store.clone(), 1024), store)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String, Option<String>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn form(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/submit")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart(field: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"a.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn clicked_and_test_return_fragments() {
    let dir = tempfile::tempdir().unwrap();

    let (status, body, content_type) = send(app(dir.path()).0, post("/clicked")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"<div id="response">Button was clicked!</div>"#);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));

    let (status, body, _) = send(app(dir.path()).0, post("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"<div id="response">You fooed it up!</div>"#);
}

#[tokio::test]
async fn fragment_routes_reject_get() {
    let dir = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .uri("/clicked")
        .body(Body::empty())
        .unwrap();

    let (status, _, _) = send(app(dir.path()).0, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn static_pages_are_served_and_unknown_paths_404() {
    let dir = tempfile::tempdir().unwrap();
    let get = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let (status, body, _) = send(app(dir.path()).0, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>index</h1>");

    let (status, body, _) = send(app(dir.path()).0, get("/otherpage")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>other</h1>");

    let (status, _, _) = send(app(dir.path()).0, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_persists_record_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let (router, store) = app(dir.path());

    let (status, body, _) = send(
        router.clone(),
        form("name=Ann&email=ann%40example.com"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"<div id="response">Form submitted!</div>"#);

    send(router, form("email=bob%40example.com")).await;
    assert_eq!(
        store.list().unwrap(),
        vec![
            Record::new(1, "Ann", "ann@example.com"),
            Record::new(2, "", "bob@example.com"),
        ]
    );
}

#[tokio::test]
async fn submit_store_failure_is_opaque_500() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteRecordStore::new(SqliteTarget {
        path: dir.path().join("missing").join("users.db"),
        field_max_chars: 100,
    }));
    let router = app_with_store(dir.path(), store, 1024);

    let (status, body, _) = send(router, form("name=Ann&email=a%40x")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
    assert!(!body.contains("Form submitted"));
}

#[tokio::test]
async fn users_listing_escapes_markup() {
    let dir = tempfile::tempdir().unwrap();
    let (router, store) = app(dir.path());
    store.insert("<script>", "a@x").unwrap();

    let request = Request::builder().uri("/users").body(Body::empty()).unwrap();
    let (status, body, _) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<th>ID</th><th>Name</th><th>Email</th>"));
    assert!(body.contains("<td>1</td><td>&lt;script&gt;</td><td>a@x</td>"));
}

#[tokio::test]
async fn upload_writes_destination() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path());

    let (status, body, _) = send(router, multipart("file", b"payload bytes")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<p>File uploaded!</p>");
    assert_eq!(
        std::fs::read(dir.path().join("uploaded_file")).unwrap(),
        b"payload bytes"
    );
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path());

    let (status, body, _) = send(router, multipart("attachment", b"x")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unable to get file");
    assert!(!dir.path().join("uploaded_file").exists());
}

#[tokio::test]
async fn upload_without_multipart_body_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (router, _) = app(dir.path());

    let (status, body, _) = send(router, post("/upload")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Unable to parse form");
}

#[tokio::test]
async fn oversized_upload_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let router = app_with_store(dir.path(), Arc::new(MemoryRecordStore::new()), 16);

    let (status, _, _) = send(router, multipart("file", &[b'x'; 64])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!dir.path().join("uploaded_file").exists());
}
