// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Perplexity chat-completions API.
//!
//! Provides [`PerplexityClient`], which handles bearer authentication,
//! request serialization and error mapping. Each call is a single attempt.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use sonarmcp_core::{ChatRequest, SonarError};
use tracing::debug;

use crate::types::{ApiErrorResponse, CompletionResponse};

/// HTTP client for Perplexity API communication.
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl PerplexityClient {
    /// Creates a new Perplexity API client.
    ///
    /// # Arguments
    /// * `api_key` - bearer token for authentication
    /// * `base_url` - full chat-completions endpoint URL
    /// * `timeout` - whole-request timeout
    pub fn new(
        api_key: &SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SonarError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| SonarError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SonarError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one chat-completion request and returns the parsed response.
    pub async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, SonarError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = request.model.as_str(), "completion response received");

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Perplexity API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or(status.as_str()),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(SonarError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| SonarError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> SonarError {
        if e.is_timeout() {
            return SonarError::Timeout {
                duration: self.timeout,
            };
        }
        SonarError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}
