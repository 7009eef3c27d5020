// Environment-driven configuration for the hosted API client

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";
pub const DEFAULT_SPEECH_VOICE: &str = "alloy";
pub const DEFAULT_TRANSCRIBE_MODEL: &str = "whisper-1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub speech_model: String,
    pub speech_voice: String,
    pub transcribe_model: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            speech_voice: DEFAULT_SPEECH_VOICE.to_string(),
            transcribe_model: DEFAULT_TRANSCRIBE_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Build a config from the environment. A missing key becomes an
    /// empty string and surfaces later as the service's auth error.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();

        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let chat_model = std::env::var("CHAT_MODEL")
            .ok()
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        let speech_model = std::env::var("SPEECH_MODEL")
            .ok()
            .unwrap_or_else(|| DEFAULT_SPEECH_MODEL.to_string());

        let speech_voice = std::env::var("SPEECH_VOICE")
            .ok()
            .unwrap_or_else(|| DEFAULT_SPEECH_VOICE.to_string());

        let transcribe_model = std::env::var("TRANSCRIBE_MODEL")
            .ok()
            .unwrap_or_else(|| DEFAULT_TRANSCRIBE_MODEL.to_string());

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            base_url,
            chat_model,
            speech_model,
            speech_voice,
            transcribe_model,
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
