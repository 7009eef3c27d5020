//! Client for the hosted AI API behind the note-taking app.
//!
//! Four operations share one request path: chat completion, speech
//! synthesis, audio transcription and photo text extraction. The client
//! applies bearer auth and a per-call timeout in a single place and never
//! retries; callers decide what a failure means for the user.

pub mod chat;
pub mod chunk;
pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod speech;
pub mod transcribe;
pub mod vision;

pub use chat::{ChatContent, ChatMessage, ChatRole, ChatSession, ContentPart};
pub use chunk::{split_for_synthesis, MAX_CHUNK_CHARS};
pub use client::{ApiClient, RequestBody};
pub use config::ApiConfig;
pub use error::ApiError;
pub use speech::{SpeechAudio, SPEECH_FORMAT};
