use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::{Error, Result};

/// Environment variables consulted for the provider credential, in order.
const API_KEY_ENV_VARS: &[&str] = &["CHATBRIDGE_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub project_name: String,
    pub project_description: String,
    pub base_system_prompt: String,
    /// When false the assembler passes caller messages through unchanged.
    pub system_prompt_enabled: bool,
    /// Maximum number of forwarded non-system messages, current turn
    /// included. Absent means the full history is forwarded.
    pub chat_history_limit: Option<usize>,
    /// Attempt count quoted in the system prompt.
    pub max_iterations: u32,
    /// Reserved for a retrieval-augmentation extension; not consumed yet.
    pub retrieval_top_k: usize,
    pub max_message_length: usize,
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "ChatBridge".to_string(),
            project_description: "A chat service bridging conversations to model providers"
                .to_string(),
            base_system_prompt: "You are a helpful assistant.".to_string(),
            system_prompt_enabled: true,
            chat_history_limit: Some(20),
            max_iterations: 3,
            retrieval_top_k: 5,
            max_message_length: 4000,
            provider: ProviderConfig {
                api_key: None,
                api_base: "https://api.openai.com".to_string(),
                timeout_seconds: 60,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when no
    /// path is given or the file does not exist. The provider credential may
    /// always be supplied via the environment instead of the file.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!("Loading configuration from: {:?}", path);
                let content = fs::read_to_string(path).await?;
                toml::from_str(&content)
                    .map_err(|e| Error::Config(config::ConfigError::Message(e.to_string())))?
            }
            Some(path) => {
                info!("Config file not found at {:?}, using defaults", path);
                Self::default()
            }
            None => {
                info!("No config file given, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// The environment always wins over the file for the credential.
    pub fn apply_env_overrides(&mut self) {
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    self.provider.api_key = Some(key);
                    return;
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(Error::validation("project_name must not be empty"));
        }

        if self.max_iterations == 0 {
            return Err(Error::validation("max_iterations must be at least 1"));
        }

        if self.chat_history_limit == Some(0) {
            return Err(Error::validation(
                "chat_history_limit must be at least 1 when set",
            ));
        }

        if self.max_message_length == 0 {
            return Err(Error::validation("max_message_length must be at least 1"));
        }

        if self.provider.api_base.trim().is_empty() {
            return Err(Error::validation("provider.api_base must not be empty"));
        }

        if self.provider.timeout_seconds == 0 {
            return Err(Error::validation(
                "provider.timeout_seconds must be at least 1",
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(Error::validation("server.host must not be empty"));
        }

        Ok(())
    }
}
