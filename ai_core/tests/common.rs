//! In-process stand-in for the hosted API.
//!
//! Binds an ephemeral port and answers the three endpoints the client
//! uses, echoing enough of each request back that tests can assert on
//! what was sent. Extra routes simulate failure shapes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ai_core::{ApiClient, ApiConfig};

#[derive(Clone, Default)]
struct StubState {
    calls: Arc<AtomicUsize>,
    speech_calls: Arc<AtomicUsize>,
    speech_fail_from: Arc<AtomicUsize>,
    chat_no_choices: Arc<AtomicBool>,
}

pub struct StubApi {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    speech_fail_from: Arc<AtomicUsize>,
    chat_no_choices: Arc<AtomicBool>,
}

impl StubApi {
    pub fn config(&self) -> ApiConfig {
        ApiConfig::default()
            .with_api_key("test-key")
            .with_base_url(self.base_url.clone())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make the speech route fail every call from `call` on (1-based).
    pub fn fail_speech_from(&self, call: usize) {
        self.speech_fail_from.store(call, Ordering::SeqCst);
    }

    /// Make the chat route answer with an empty choices array.
    pub fn reply_without_choices(&self) {
        self.chat_no_choices.store(true, Ordering::SeqCst);
    }
}

pub async fn start() -> StubApi {
    let state = StubState::default();
    let calls = state.calls.clone();
    let speech_fail_from = state.speech_fail_from.clone();
    let chat_no_choices = state.chat_no_choices.clone();

    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/audio/speech", post(speech))
        .route("/v1/audio/transcriptions", post(transcribe))
        .route("/v1/error/api", post(api_error))
        .route("/v1/error/plain", post(plain_error))
        .route("/v1/slow", post(slow))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubApi {
        base_url: format!("http://{addr}/v1"),
        calls,
        speech_fail_from,
        chat_no_choices,
    }
}

async fn chat(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer test-key")
        .unwrap_or(false);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "missing bearer token" } })),
        )
            .into_response();
    }

    if state.chat_no_choices.load(Ordering::SeqCst) {
        return Json(json!({ "choices": [] })).into_response();
    }

    let reply = match body["messages"].as_array().and_then(|m| m.last()) {
        Some(last) => describe_content(&last["content"]),
        None => "no messages".to_string(),
    };
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": reply } }]
    }))
    .into_response()
}

/// Echo plain content, or name the image when the message carries parts.
fn describe_content(content: &Value) -> String {
    if let Some(text) = content.as_str() {
        return format!("echo: {text}");
    }
    if let Some(parts) = content.as_array() {
        for part in parts {
            if part["type"] == "image_url" {
                let url = part["image_url"]["url"].as_str().unwrap_or("");
                let head = url.split(',').next().unwrap_or("");
                return format!("image: {head}");
            }
        }
        return "parts without image".to_string();
    }
    "unrecognized content".to_string()
}

/// "Audio" for a chunk is the chunk text in angle brackets; stitched
/// output then shows chunk order and boundaries. An armed failure point
/// rejects every call from that speech call on.
async fn speech(State(state): State<StubState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let call = state.speech_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let fail_from = state.speech_fail_from.load(Ordering::SeqCst);
    if fail_from != 0 && call >= fail_from {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "synthesis backend down" } })),
        )
            .into_response();
    }

    let input = body["input"].as_str().unwrap_or("");
    format!("<{input}>").into_bytes().into_response()
}

async fn transcribe(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> Result<String, StatusCode> {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let mut file_name = String::new();
    let mut mime = String::new();
    let mut bytes = 0usize;
    let mut model = String::new();
    let mut format = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().unwrap_or("").to_string();
                mime = field.content_type().unwrap_or("").to_string();
                bytes = field
                    .bytes()
                    .await
                    .map_err(|_| StatusCode::BAD_REQUEST)?
                    .len();
            }
            "model" => model = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?,
            "response_format" => {
                format = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?
            }
            _ => {}
        }
    }

    // Trailing newline matches the real service's text format.
    Ok(format!(
        "file={file_name}|mime={mime}|bytes={bytes}|model={model}|format={format}\n"
    ))
}

async fn api_error(State(state): State<StubState>) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "message": "input too short", "type": "invalid_request_error" } })),
    )
}

async fn plain_error(State(state): State<StubState>) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn slow(State(state): State<StubState>) -> &'static str {
    state.calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(3)).await;
    "late"
}
