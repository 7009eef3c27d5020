use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::client::{ApiClient, RequestBody};
use crate::error::ApiError;

/// Conversation roles understood by the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One image reference inside a message part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// A piece of mixed message content. Plain conversations use bare string
/// content instead; parts only appear when an image rides along.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// Message content on the wire: either a plain string or a list of parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: ChatContent,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: ChatContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: ChatContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: ChatContent::Text(content.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: ChatRole::User,
            content: ChatContent::Parts(parts),
        }
    }
}

/// An append-only conversation transcript. Turns are only ever pushed;
/// editing history would desynchronize the exchange from what the model
/// actually saw.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    /// Start a session whose first turn is a system prompt.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.messages.push(ChatMessage::system(prompt));
        session
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantReply,
}

#[derive(Deserialize)]
struct AssistantReply {
    content: Option<String>,
}

impl ApiClient {
    /// Send a conversation to the chat endpoint and return the first
    /// choice's text.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        if messages.is_empty() {
            return Err(ApiError::InvalidInput(
                "conversation has no messages".to_string(),
            ));
        }

        let body = json!({
            "model": self.config().chat_model,
            "messages": messages,
        });

        let response = self.request("chat/completions", RequestBody::Json(body)).await?;
        let bytes = self.read_bytes(response).await?;
        let completion: ChatCompletion =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ApiError::Parse("completion contained no choices".to_string()))
    }
}
