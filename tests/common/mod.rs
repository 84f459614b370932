#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use solution_gateway::config::GatewayConfig;
use solution_gateway::services::gemini::TextGenerator;
use solution_gateway::services::storage::LocalStorageService;
use solution_gateway::{AppState, create_app};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "---------------------------123456789012345678901234567";

pub struct TestApp {
    pub router: Router,
    pub files_dir: TempDir,
}

pub fn setup_app() -> TestApp {
    setup_app_with(|_| {}, None)
}

pub fn setup_app_with(
    customize: impl FnOnce(&mut GatewayConfig),
    generator: Option<Arc<dyn TextGenerator>>,
) -> TestApp {
    let files_dir = tempfile::tempdir().unwrap();
    let mut config = GatewayConfig::development(files_dir.path());
    customize(&mut config);

    let state = AppState {
        storage: Arc::new(LocalStorageService::new(&config.files_dir)),
        config,
        generator,
    };

    TestApp {
        router: create_app(state),
        files_dir,
    }
}

pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
        Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
        Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(app: &Router, body: Vec<u8>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/solution")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn upload_file(app: &Router, filename: &str, content: &[u8]) -> (StatusCode, Value) {
    upload(app, multipart_body("file", filename, content)).await
}

/// Returns status, content type and raw body.
pub async fn get_raw(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, bytes.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get_raw(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
