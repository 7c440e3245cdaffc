use std::sync::Arc;

use tracing::debug;

use crate::app::config::AppConfig;
use crate::chat::prompts::SystemPromptConfig;
use crate::chat::types::{ChatError, ChatMessage, ChatRequest, ChatResponse, ChatRole};
use crate::models::provider::{CompletionRequest, Message, ModelProvider, ProviderError};

/// Assembly policy for outbound message lists.
///
/// With neither field set the assembler is the identity: the caller's
/// messages pass through unchanged, role-mapped to the provider
/// representation.
#[derive(Debug, Clone, Default)]
pub struct PromptPolicy {
    pub system_prompt: Option<SystemPromptConfig>,
    /// Maximum number of forwarded non-system messages, current turn
    /// included. Older history is silently dropped.
    pub history_limit: Option<usize>,
}

impl PromptPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            system_prompt: config
                .system_prompt_enabled
                .then(|| SystemPromptConfig::from_config(config)),
            history_limit: config.chat_history_limit,
        }
    }
}

/// Chat service coordinating request assembly and response translation.
///
/// The provider handle is absent when no credential was configured; every
/// call then fails with `ConfigurationMissing` before any outbound attempt.
pub struct ChatService {
    provider: Option<Arc<dyn ModelProvider>>,
    policy: PromptPolicy,
}

impl ChatService {
    pub fn new(provider: Option<Arc<dyn ModelProvider>>, policy: PromptPolicy) -> Self {
        Self { provider, policy }
    }

    /// Generate a reply for the given request with a single outbound call.
    /// No retries are attempted for any failure category.
    pub async fn generate_response(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ChatError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(ChatError::ConfigurationMissing)?;

        let messages = self.assemble_messages(&request.messages);
        debug!(
            "Assembled {} outbound messages for model {}",
            messages.len(),
            request.model
        );

        let completion = provider
            .complete(CompletionRequest::new(request.model.clone(), messages))
            .await
            .map_err(translate_provider_error)?;

        let candidate = completion
            .candidates
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?;

        Ok(ChatResponse {
            message: candidate.content,
        })
    }

    /// Build the outbound message list. Ordering invariant:
    /// `[system prompt?] + [trimmed history, oldest first] + [current turn]`.
    fn assemble_messages(&self, messages: &[ChatMessage]) -> Vec<Message> {
        let mut assembled = Vec::with_capacity(messages.len() + 1);

        if let Some(prompt) = &self.policy.system_prompt {
            assembled.push(Message::system(prompt.render()));
        }

        let Some((current, history)) = messages.split_last() else {
            return assembled;
        };

        let retained = match self.policy.history_limit {
            // keep the most recent limit-1 prior turns; the current turn
            // always occupies the remaining slot
            Some(limit) => {
                let start = history.len().saturating_sub(limit.saturating_sub(1));
                &history[start..]
            }
            None => history,
        };

        assembled.extend(retained.iter().map(to_provider_message));
        assembled.push(to_provider_message(current));
        assembled
    }
}

fn to_provider_message(message: &ChatMessage) -> Message {
    match message.role {
        ChatRole::User => Message::user(message.content.clone()),
        ChatRole::Assistant => Message::assistant(message.content.clone()),
    }
}

/// Total translation from provider failure categories to the chat taxonomy.
fn translate_provider_error(err: ProviderError) -> ChatError {
    match err {
        ProviderError::Authentication(msg) => ChatError::AuthenticationFailed(msg),
        ProviderError::RateLimited(msg) => ChatError::RateLimitExceeded(msg),
        ProviderError::Connection(_) => ChatError::ConnectionFailed,
        ProviderError::ModelNotFound(msg) => ChatError::ModelNotFound(msg),
        ProviderError::Unexpected(msg) => ChatError::Upstream(msg),
    }
}
