use tracing::debug;

use crate::chat::{ChatMessage, ContentPart};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::media::data_url;

/// Instruction sent with every photo-to-text request. The model is asked
/// for the text alone, with the original line breaks kept.
const EXTRACT_PROMPT: &str = "Extract all readable text from this image. \
Return only the extracted text, preserving the original line breaks. \
If the image contains no text, return an empty response.";

impl ApiClient {
    /// Pull readable text out of an image via the chat endpoint, with the
    /// image inlined as a base64 data URL.
    pub async fn extract_text(&self, image: &[u8], mime: &str) -> Result<String, ApiError> {
        if image.is_empty() {
            return Err(ApiError::InvalidInput(
                "no image data to extract text from".to_string(),
            ));
        }

        debug!(%mime, bytes = image.len(), "requesting text extraction");
        let message = ChatMessage::user_parts(vec![
            ContentPart::text(EXTRACT_PROMPT),
            ContentPart::image(data_url(mime, image)),
        ]);

        let text = self.chat(&[message]).await?;
        Ok(text.trim().to_string())
    }
}
