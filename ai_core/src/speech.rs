use serde_json::json;
use tracing::{debug, info};

use crate::chunk::{split_for_synthesis, MAX_CHUNK_CHARS};
use crate::client::{ApiClient, RequestBody};
use crate::error::ApiError;

/// Audio encoding requested from the synthesis endpoint. The service
/// returns raw encoded frames; chunk responses concatenate
/// byte-for-byte into one playable stream.
pub const SPEECH_FORMAT: &str = "mp3";

/// Stitched synthesis output with its declared encoding.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub data: Vec<u8>,
    pub format: &'static str,
}

impl SpeechAudio {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            format: SPEECH_FORMAT,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ApiClient {
    /// Synthesize speech for `text`, splitting it into service-sized
    /// chunks and stitching the responses back together in input order.
    ///
    /// Chunks are dispatched strictly one at a time, never concurrently.
    /// Any chunk failure aborts the whole synthesis with no partial
    /// audio.
    pub async fn synthesize(&self, text: &str) -> Result<SpeechAudio, ApiError> {
        let chunks = split_for_synthesis(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Ok(SpeechAudio::empty());
        }

        let mut data = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(index, chars = chunk.chars().count(), "synthesizing chunk");
            let body = json!({
                "model": self.config().speech_model,
                "input": chunk,
                "voice": self.config().speech_voice,
                "response_format": SPEECH_FORMAT,
            });
            let response = self.request("audio/speech", RequestBody::Json(body)).await?;
            let bytes = self.read_bytes(response).await?;
            data.extend_from_slice(&bytes);
        }

        info!(
            chunks = chunks.len(),
            bytes = data.len(),
            "speech synthesis complete"
        );
        Ok(SpeechAudio {
            data,
            format: SPEECH_FORMAT,
        })
    }
}
