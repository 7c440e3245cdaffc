use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a message in the outbound provider representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single role-tagged message submitted to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A single chat-completion request: model name plus the ordered messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

/// One candidate completion returned by a provider. The content may be
/// absent; that is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub content: Option<String>,
}

/// Result of a successful provider call: zero or more candidate completions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    pub candidates: Vec<Candidate>,
}

impl Completion {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

/// Closed set of failure categories a provider call can report.
///
/// Vendor-specific failures are re-expressed as these tagged variants so the
/// chat service can translate them with an exhaustive match instead of
/// matching on SDK exception types. Anything a provider cannot classify ends
/// up in `Unexpected` and is surfaced, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("unexpected provider failure: {0}")]
    Unexpected(String),
}

/// Interface to a chat-completion provider.
///
/// Implementors encapsulate transport, serialization, and vendor API details
/// and must be safe for concurrent use by multiple request handlers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Submit the request and return the provider's candidate completions.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;

    fn name(&self) -> &str;
}
