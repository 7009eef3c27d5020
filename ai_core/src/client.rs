use reqwest::multipart::Form;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Payload for one outbound call. Chat, synthesis and vision send JSON;
/// transcription uploads a multipart form.
pub enum RequestBody {
    Json(Value),
    Multipart(Form),
}

/// Client for the hosted AI API.
///
/// Every operation in this crate funnels through [`ApiClient::request`]:
/// one place that attaches bearer auth, applies the per-call timeout and
/// turns non-success responses into [`ApiError`]. Requests are never
/// retried; a failure is reported to the caller as-is.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Client configured from the environment (`OPENAI_API_KEY` and
    /// friends).
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue a single POST to `{base_url}/{path}` and hand back the raw
    /// response once its status has been checked.
    pub async fn request(
        &self,
        path: &str,
        body: RequestBody,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(%url, "dispatching API request");

        let builder = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout());

        let builder = match body {
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }
        Ok(response)
    }

    /// Read a checked response to completion as raw bytes.
    pub(crate) async fn read_bytes(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<u8>, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(bytes.to_vec())
    }

    /// Read a checked response to completion as UTF-8 text.
    pub(crate) async fn read_text(
        &self,
        response: reqwest::Response,
    ) -> Result<String, ApiError> {
        response.text().await.map_err(|e| self.transport_error(e))
    }

    /// The timeout spans dispatch through the end of the body; reqwest
    /// can report it during send or during a body read. Both become the
    /// same variant.
    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            ApiError::Http(err)
        }
    }

    /// Shape a non-success response into an error, preferring the
    /// service's own `{"error": {"message": ...}}` body over the bare
    /// status line.
    async fn status_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<Value>(&body).ok())
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "API call failed");
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
