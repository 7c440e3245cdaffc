use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::config::AppConfig;
use crate::chat::{ChatService, PromptPolicy};
use crate::error::Result;
use crate::models::{ModelProvider, OpenAiProvider};

/// Shared per-process state: the immutable configuration and the chat
/// service built over it. Constructed once at startup, then read-only.
pub struct AppState {
    config: Arc<AppConfig>,
    chat_service: ChatService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider: Option<Arc<dyn ModelProvider>> = match &config.provider.api_key {
            Some(api_key) => {
                let provider = OpenAiProvider::with_base_url(
                    api_key.clone(),
                    config.provider.api_base.clone(),
                    Duration::from_secs(config.provider.timeout_seconds),
                )?;
                info!("Initialized {} provider", provider.name());
                Some(Arc::new(provider))
            }
            None => {
                warn!("No provider API key configured; chat requests will be rejected");
                None
            }
        };

        Ok(Self::with_provider(config, provider))
    }

    /// Wiring seam used by tests to substitute a stub provider.
    pub fn with_provider(config: AppConfig, provider: Option<Arc<dyn ModelProvider>>) -> Self {
        let policy = PromptPolicy::from_config(&config);
        Self {
            config: Arc::new(config),
            chat_service: ChatService::new(provider, policy),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn chat_service(&self) -> &ChatService {
        &self.chat_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_without_credential_has_no_provider() {
        let state = AppState::new(AppConfig::default()).unwrap();
        assert!(state.config().provider.api_key.is_none());
    }

    #[test]
    fn test_state_with_credential_builds_provider() {
        let mut config = AppConfig::default();
        config.provider.api_key = Some("test-key".to_string());

        let state = AppState::new(config);
        assert!(state.is_ok());
    }
}
