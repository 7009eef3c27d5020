use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::client::{ApiClient, RequestBody};
use crate::error::ApiError;
use crate::media::extension_for_mime;

impl ApiClient {
    /// Upload recorded audio to the transcription endpoint and return the
    /// recognized text.
    ///
    /// The upload is a multipart form whose file part is named
    /// `audio.<ext>`, with the extension derived from `mime`; the service
    /// rejects uploads whose extension it does not recognize. The
    /// response is requested as plain text.
    pub async fn transcribe(&self, audio: Vec<u8>, mime: &str) -> Result<String, ApiError> {
        if audio.is_empty() {
            return Err(ApiError::InvalidInput(
                "no audio data to transcribe".to_string(),
            ));
        }

        let filename = format!("audio.{}", extension_for_mime(mime));
        debug!(%filename, bytes = audio.len(), "uploading audio for transcription");

        let part = Part::bytes(audio)
            .file_name(filename)
            .mime_str(mime)
            .map_err(|_| ApiError::InvalidInput(format!("unusable MIME type: {mime}")))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.config().transcribe_model.clone())
            .text("response_format", "text");

        let response = self
            .request("audio/transcriptions", RequestBody::Multipart(form))
            .await?;
        let text = self.read_text(response).await?;
        Ok(text.trim().to_string())
    }
}
