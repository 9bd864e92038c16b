//! HTTP tests for file serving and traversal protection

use super::test_utils::{send, send_request, test_app, test_store, write_file};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tempfile::TempDir;

#[tokio::test]
async fn test_serves_file_bytes() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "mods/pack.txt", "payload bytes");
    let app = test_app(test_store(temp_dir.path()));

    let response = send(&app, Method::GET, "/files/mods/pack.txt").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"payload bytes");
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_serves_range_requests() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "data.bin", b"0123456789");
    let app = test_app(test_store(temp_dir.path()));

    let request = Request::builder()
        .uri("/files/data.bin")
        .header(header::RANGE, "bytes=2-5")
        .body(Body::empty())
        .unwrap();
    let response = send_request(&app, request).await;

    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.body, b"2345");
}

#[tokio::test]
async fn test_file_served_from_disk_not_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(test_store(temp_dir.path()));

    // Created after the manifest was built; served anyway
    write_file(temp_dir.path(), "late.txt", "late");
    let response = send(&app, Method::GET, "/files/late.txt").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"late");
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("served");
    write_file(&root, "ok.txt", "ok");
    write_file(temp_dir.path(), "secret.txt", "top secret");
    let app = test_app(test_store(&root));

    for uri in [
        "/files/../../etc/passwd",
        "/files/../secret.txt",
        "/files/sub/../../secret.txt",
        "/files/%2e%2e/secret.txt",
        "/files/..%2fsecret.txt",
        "/files/%2Fetc%2Fpasswd",
    ] {
        let response = send(&app, Method::GET, uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{} was not rejected", uri);
        assert!(!response.text().contains("top secret"));
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_backslash_names_are_listed_and_served() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("served");
    write_file(&root, "a\\b.txt", "backslash");
    write_file(temp_dir.path(), "secret.txt", "top secret");
    let store = test_store(&root);
    let app = test_app(store.clone());

    let paths: Vec<_> = store
        .current_snapshot()
        .files()
        .iter()
        .map(|f| f.relative_path().to_string())
        .collect();
    assert_eq!(paths, vec!["a\\b.txt"]);

    let response = send(&app, Method::GET, "/files/a%5Cb.txt").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"backslash");

    // A single component under the root, not a way out of it
    let response = send(&app, Method::GET, "/files/..%5Csecret.txt").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(!response.text().contains("top secret"));
}

#[tokio::test]
async fn test_empty_file_path_is_400() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(test_store(temp_dir.path()));

    for uri in ["/files/", "/files"] {
        let response = send(&app, Method::GET, uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let temp_dir = TempDir::new().unwrap();
    let app = test_app(test_store(temp_dir.path()));

    let response = send(&app, Method::GET, "/files/not/there.bin").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_directory_is_not_listed() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "dir/inside.txt", "x");
    let app = test_app(test_store(temp_dir.path()));

    let response = send(&app, Method::GET, "/files/dir").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_files_wrong_method() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "a.txt", "a");
    let app = test_app(test_store(temp_dir.path()));

    let response = send(&app, Method::POST, "/files/a.txt").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
