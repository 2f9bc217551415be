use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const UPLOADED_FILE_URI: &str = "https://files.example/files/abc123";

/// Records what a fake generative backend received and plays back replies in order.
#[derive(Clone, Default)]
pub struct FakeBackend {
    bodies: Arc<Mutex<Vec<Value>>>,
    api_keys: Arc<Mutex<Vec<String>>>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
    replies: Arc<Mutex<VecDeque<String>>>,
    status: Option<u16>,
    raw_body: Option<&'static str>,
    upload_state: Option<&'static str>,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(|r| r.to_string()).collect())),
            ..Self::default()
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_raw_body(body: &'static str) -> Self {
        Self {
            raw_body: Some(body),
            ..Self::default()
        }
    }

    /// Uploads report this state and must be polled until active.
    pub fn uploads_start_as(mut self, state: &'static str) -> Self {
        self.upload_state = Some(state);
        self
    }

    /// Completion routes stall this long before answering.
    pub fn stalling_for(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.api_keys.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }

    fn record(&self, headers: &HeaderMap, body: Value) {
        let key = headers
            .get("x-goog-api-key")
            .or_else(|| headers.get("authorization"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.api_keys.lock().unwrap().push(key);
        self.bodies.lock().unwrap().push(body);
    }

    fn next_reply(&self) -> String {
        self.replies.lock().unwrap().pop_front().unwrap_or_default()
    }

    async fn stall(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn canned(&self) -> Option<Response> {
        if let Some(status) = self.status {
            let status = StatusCode::from_u16(status).unwrap();
            return Some((status, "{\"error\": {\"message\": \"nope\"}}").into_response());
        }
        self.raw_body
            .map(|body| ([("content-type", "application/json")], body).into_response())
    }

    pub fn gemini_router(self, base_url: String) -> Router {
        let upload_url = format!("{base_url}/upload-session/abc123");
        Router::new()
            .route("/v1beta/models/{model}", post(gemini_generate))
            .route(
                "/upload/v1beta/files",
                post(move || async move { ([("x-goog-upload-url", upload_url)], Json(json!({}))) }),
            )
            .route("/upload-session/{id}", post(gemini_upload))
            .route("/v1beta/files/{id}", get(gemini_file_status))
            .with_state(self)
    }

    pub fn openai_router(self) -> Router {
        Router::new()
            .route("/v1/chat/completions", post(openai_complete))
            .with_state(self)
    }
}

async fn gemini_generate(
    State(backend): State<FakeBackend>,
    Path(_model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(&headers, body);
    backend.stall().await;
    if let Some(response) = backend.canned() {
        return response;
    }
    Json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": backend.next_reply() }] } }]
    }))
    .into_response()
}

async fn gemini_upload(
    State(backend): State<FakeBackend>,
    Path(_id): Path<String>,
    body: Bytes,
) -> Json<Value> {
    backend.uploads.lock().unwrap().push(body.to_vec());
    Json(json!({
        "file": {
            "name": "files/abc123",
            "uri": UPLOADED_FILE_URI,
            "mimeType": "application/pdf",
            "state": backend.upload_state.unwrap_or("ACTIVE"),
        }
    }))
}

async fn gemini_file_status(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "name": format!("files/{id}"),
        "uri": UPLOADED_FILE_URI,
        "mimeType": "application/pdf",
        "state": "ACTIVE",
    }))
}

async fn openai_complete(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record(&headers, body);
    backend.stall().await;
    if let Some(response) = backend.canned() {
        return response;
    }
    Json(json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": backend.next_reply() } }]
    }))
    .into_response()
}
