// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Perplexity provider for sonarmcp.
//!
//! Implements [`CompletionProvider`] over the Perplexity chat-completions
//! API. The provider is built once at startup and shared by reference.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sonarmcp_config::PerplexityConfig;
use sonarmcp_core::{ChatRequest, Completion, CompletionProvider, SonarError, TokenUsage};
use tracing::{debug, info};

use crate::client::PerplexityClient;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Perplexity provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `PERPLEXITY_API_KEY` env var -> error.
pub struct PerplexityProvider {
    client: PerplexityClient,
}

impl PerplexityProvider {
    /// Creates a provider from configuration, resolving the API key.
    pub fn new(config: &PerplexityConfig) -> Result<Self, SonarError> {
        let api_key = resolve_api_key(&config.api_key)?;
        Self::with_api_key(config, &api_key)
    }

    /// Creates a provider with an already-resolved API key.
    pub fn with_api_key(
        config: &PerplexityConfig,
        api_key: &SecretString,
    ) -> Result<Self, SonarError> {
        let client = PerplexityClient::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            base_url = client.base_url(),
            timeout_secs = config.timeout_secs,
            "Perplexity provider initialized"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionProvider for PerplexityProvider {
    fn name(&self) -> &str {
        "perplexity"
    }

    async fn complete(&self, request: ChatRequest) -> Result<Completion, SonarError> {
        let response = self.client.complete(&request).await?;

        debug!(
            id = response.id.as_str(),
            choices = response.choices.len(),
            citations = response.citations.len(),
            "completion parsed"
        );

        let first = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SonarError::provider("response contained no choices"))?;

        Ok(Completion {
            id: response.id,
            model: response.model,
            content: first.message.content,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Resolves the API key from config, falling back to `PERPLEXITY_API_KEY`.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, SonarError> {
    resolve_api_key_with(config_key, |name| std::env::var(name).ok())
}

/// Key resolution with an injectable environment lookup.
fn resolve_api_key_with(
    config_key: &Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, SonarError> {
    let key = config_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| env(API_KEY_ENV).filter(|k| !k.trim().is_empty()));

    key.map(SecretString::from).ok_or_else(|| {
        SonarError::Config(format!(
            "Perplexity API key not found. Set perplexity.api_key in config or {API_KEY_ENV} environment variable."
        ))
    })
}

/// Exposes the key for exact-match redaction.
pub fn redaction_value(key: &SecretString) -> String {
    key.expose_secret().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sonarmcp_core::ChatMessage;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn resolve_api_key_from_config() {
        let key = resolve_api_key_with(&Some("pplx-config".into()), no_env).unwrap();
        assert_eq!(key.expose_secret(), "pplx-config");
    }

    #[test]
    fn config_key_wins_over_env() {
        let key = resolve_api_key_with(&Some("pplx-config".into()), |_| {
            Some("pplx-env".into())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "pplx-config");
    }

    #[test]
    fn empty_config_key_falls_back_to_env() {
        let key = resolve_api_key_with(&Some("  ".into()), |name| {
            assert_eq!(name, API_KEY_ENV);
            Some("pplx-env".into())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "pplx-env");
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = resolve_api_key_with(&None, no_env).unwrap_err();
        assert!(matches!(err, SonarError::Config(_)));
        assert!(err.to_string().contains("API key not found"), "got: {err}");
    }

    fn provider_for(server: &MockServer) -> PerplexityProvider {
        let config = PerplexityConfig {
            api_key: None,
            base_url: format!("{}/chat/completions", server.uri()),
            timeout_secs: 5,
        };
        PerplexityProvider::with_api_key(&config, &SecretString::from("pplx-test".to_string()))
            .unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user("xin chào")],
            model: "sonar".into(),
            search: None,
            search_recency_days: None,
            response_format: None,
        }
    }

    #[tokio::test]
    async fn complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-9",
                "model": "sonar",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "first"}},
                    {"index": 1, "message": {"role": "assistant", "content": "second"}}
                ],
                "usage": {"prompt_tokens": 3, "completion_tokens": 4}
            })))
            .mount(&server)
            .await;

        let completion = provider_for(&server).complete(request()).await.unwrap();
        assert_eq!(completion.id, "cmpl-9");
        assert_eq!(completion.content, json!("first"));
        assert_eq!(
            completion.usage,
            Some(TokenUsage {
                prompt_tokens: 3,
                completion_tokens: 4
            })
        );
    }

    #[tokio::test]
    async fn empty_choices_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x", "choices": []})))
            .mount(&server)
            .await;

        let err = provider_for(&server).complete(request()).await.unwrap_err();
        assert!(err.to_string().contains("no choices"), "got: {err}");
    }

    #[test]
    fn provider_name() {
        let config = PerplexityConfig::default();
        let provider =
            PerplexityProvider::with_api_key(&config, &SecretString::from("k".to_string()))
                .unwrap();
        assert_eq!(provider.name(), "perplexity");
    }
}
