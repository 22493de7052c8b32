// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Perplexity chat-completions response and error types.
//!
//! The request body is [`sonarmcp_core::ChatRequest`], serialized as-is.

use serde::Deserialize;
use serde_json::Value;

/// A response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Response id.
    #[serde(default)]
    pub id: String,

    /// Model that produced the response.
    #[serde(default)]
    pub model: String,

    /// Completion choices; only the first is used.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage.
    #[serde(default)]
    pub usage: Option<ApiUsage>,

    /// Source URLs cited by search-augmented answers.
    #[serde(default)]
    pub citations: Vec<String>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message carried by a choice.
///
/// `content` is kept as a raw JSON value: usually a string, but passed
/// through unchanged if the API returns structured content.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Value,
}

/// Token usage block.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_completion() {
        let body = json!({
            "id": "cmpl-1",
            "model": "sonar",
            "created": 1_700_000_000,
            "usage": {"prompt_tokens": 12, "completion_tokens": 30, "total_tokens": 42},
            "citations": ["https://vnexpress.net/a"],
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": "Giá vàng SJC..."}
            }]
        });
        let resp: CompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.id, "cmpl-1");
        assert_eq!(resp.choices.len(), 1);
        assert_eq!(resp.choices[0].message.content, json!("Giá vàng SJC..."));
        assert_eq!(resp.usage.unwrap().completion_tokens, 30);
        assert_eq!(resp.citations.len(), 1);
    }

    #[test]
    fn structured_content_passes_through() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": {"price": 82.5}}}]
        });
        let resp: CompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.choices[0].message.content, json!({"price": 82.5}));
        assert!(resp.usage.is_none());
    }

    #[test]
    fn parses_error_body() {
        let body = json!({"error": {"message": "Invalid model", "type": "invalid_model", "code": 400}});
        let err: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(err.error.message, "Invalid model");
        assert_eq!(err.error.type_.as_deref(), Some("invalid_model"));
    }
}
