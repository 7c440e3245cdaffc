use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, Result};

/// Role accepted in inbound chat requests. `system` messages are synthesized
/// internally and rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single caller-supplied conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// An inbound chat request. The last message is treated as the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Boundary validation, enforced before the chat service is invoked.
    pub fn validate(&self, max_message_length: usize) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::validation("model must not be empty"));
        }

        if self.messages.is_empty() {
            return Err(Error::validation("messages must contain at least one entry"));
        }

        for (index, message) in self.messages.iter().enumerate() {
            if message.content.chars().count() > max_message_length {
                return Err(Error::validation(format!(
                    "message {} exceeds the maximum length of {} characters",
                    index, max_message_length
                )));
            }
        }

        Ok(())
    }
}

/// The reply produced for a chat request. `message` is `None` when the
/// provider returned a content-less candidate; that serializes as JSON null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: Option<String>,
}

/// Closed error taxonomy for chat calls.
///
/// Every failed call is translated into exactly one variant carrying a
/// human-readable message; `status_code` is the HTTP status the transport
/// layer surfaces together with the message in a `detail` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("OpenAI authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("OpenAI rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Failed to connect to OpenAI API")]
    ConnectionFailed,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("OpenAI API key is not configured")]
    ConfigurationMissing,

    #[error("OpenAI returned an empty response")]
    EmptyResponse,

    #[error("Upstream provider failure: {0}")]
    Upstream(String),
}

impl ChatError {
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::AuthenticationFailed(_) => 401,
            ChatError::RateLimitExceeded(_) => 429,
            ChatError::ConnectionFailed => 502,
            ChatError::ModelNotFound(_) => 404,
            ChatError::ConfigurationMissing => 503,
            ChatError::EmptyResponse => 500,
            ChatError::Upstream(_) => 500,
        }
    }
}
