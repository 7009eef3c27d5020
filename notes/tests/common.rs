//! Minimal stand-in for the hosted API, for exercising note operations
//! end to end.

use axum::extract::Multipart;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ai_core::{ApiClient, ApiConfig};

pub async fn start() -> ApiClient {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .route("/v1/audio/transcriptions", post(transcribe));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(
        ApiConfig::default()
            .with_api_key("test-key")
            .with_base_url(format!("http://{addr}/v1")),
    )
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let content = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .map(|m| m["content"].clone())
        .unwrap_or(Value::Null);
    let reply = match content.as_str() {
        Some(text) => format!("reply to: {text}"),
        None => "extracted text from image".to_string(),
    };
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": reply } }]
    }))
}

async fn transcribe(mut multipart: Multipart) -> String {
    let mut file_name = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            file_name = field.file_name().unwrap_or("").to_string();
            let _ = field.bytes().await.unwrap();
        }
    }
    format!("transcript of {file_name}")
}
