use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::provider::{
    Candidate, Completion, CompletionRequest, Message, ModelProvider, ProviderError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Provider backed by the OpenAI chat-completions API (or any endpoint
/// speaking the same wire format).
///
/// The shared `reqwest::Client` pools connections and is safe to use from
/// concurrent request handlers.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), Duration::from_secs(60))
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(&self) -> std::result::Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| ProviderError::Authentication(format!("invalid API key format: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<Completion, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let headers = self.create_headers()?;

        let api_request = ApiRequest {
            model: &request.model,
            messages: &request.messages,
        };

        debug!(
            "Sending request to OpenAI: model={}, messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("OpenAI API error: {} - {}", status, error_text);
            return Err(classify_status(status, error_text));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("failed to parse response: {}", e)))?;

        Ok(Completion::new(
            api_response
                .choices
                .into_iter()
                .map(|choice| Candidate {
                    content: choice.message.content,
                })
                .collect(),
        ))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Map an unsuccessful HTTP status to the closed provider error set.
/// Statuses outside the known categories stay unclassified.
fn classify_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(message),
        StatusCode::NOT_FOUND => ProviderError::ModelNotFound(message),
        _ => ProviderError::Unexpected(format!("API error {}: {}", status, message)),
    }
}

// OpenAI API request/response structures
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    // null when the model produced no text content
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key".to_string());
        assert!(provider.is_ok());

        let provider = provider.unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = OpenAiProvider::with_base_url(
            "test-key".to_string(),
            "http://localhost:1234/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_classify_status_covers_known_categories() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            ProviderError::Authentication("bad key".to_string())
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string()),
            ProviderError::RateLimited("slow down".to_string())
        );
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND, "no such model".to_string()),
            ProviderError::ModelNotFound("no such model".to_string())
        );
    }

    #[test]
    fn test_classify_status_leaves_others_unclassified() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        assert_eq!(
            err,
            ProviderError::Unexpected("API error 500 Internal Server Error: boom".to_string())
        );

        // 403 is a permission failure, not an invalid credential
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "denied".to_string()),
            ProviderError::Unexpected(_)
        ));
    }

    #[test]
    fn test_api_response_allows_null_content() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("be brief"), Message::user("Hi")];
        let request = ApiRequest {
            model: "test-model",
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hi");
    }
}
