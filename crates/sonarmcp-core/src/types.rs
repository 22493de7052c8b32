// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the provider, and the MCP server.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use strum::{Display, EnumString};

/// Request preset chosen for a query.
///
/// Derived per call by the classifier and never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Plain chat on the base model, no search.
    Chat,
    /// Search-augmented chat on the base model.
    SearchLite,
    /// Search-augmented chat on the enhanced model, limited to recent sources.
    SearchPro,
    /// Search-augmented structured analysis on the enhanced model.
    Analysis,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Chat, Mode::SearchLite, Mode::SearchPro, Mode::Analysis];
}

/// A single message in the chat-completion conversation format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user" or "assistant".
    pub role: String,
    /// Raw message text.
    pub content: String,
}

impl ChatMessage {
    /// Builds a user turn with the given content, unmodified.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Structured-output directive asking the API to emit JSON matching a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Always "json_schema".
    #[serde(rename = "type")]
    pub format_type: String,
    /// Wrapper holding the caller-supplied schema.
    pub json_schema: JsonSchemaFormat,
}

/// Inner object of a [`ResponseFormat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    /// Caller-supplied schema, passed through verbatim.
    pub schema: Value,
}

impl ResponseFormat {
    /// Wraps an opaque schema value into a `json_schema` directive.
    pub fn json_schema(schema: Value) -> Self {
        Self {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaFormat { schema },
        }
    }
}

/// Parameters for one chat-completion call.
///
/// Optional fields are omitted from the wire payload when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages; the router always builds exactly one user turn.
    pub messages: Vec<ChatMessage>,

    /// Model identifier.
    pub model: String,

    /// Enables web search augmentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,

    /// Restricts search results to sources published within this many days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_recency_days: Option<u32>,

    /// Structured-output directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Normalized result of a chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Provider-assigned response id.
    pub id: String,
    /// Model that produced the response.
    pub model: String,
    /// Message content of the first choice (text, or a structured value).
    pub content: Value,
    /// Token usage, if the provider reported it.
    pub usage: Option<TokenUsage>,
}

/// Uniform response returned to every tool caller.
///
/// Serializes to `{"success": true, "mode", "result"}` or
/// `{"success": false, "mode", "error"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub enum ToolEnvelope {
    Success { mode: Mode, result: Value },
    Failure { mode: Mode, error: String },
}

impl ToolEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolEnvelope::Success { .. })
    }

    /// The mode the query was classified into.
    pub fn mode(&self) -> Mode {
        match self {
            ToolEnvelope::Success { mode, .. } | ToolEnvelope::Failure { mode, .. } => *mode,
        }
    }

    /// Renders the envelope as a JSON object.
    pub fn to_json(&self) -> Value {
        match self {
            ToolEnvelope::Success { mode, result } => serde_json::json!({
                "success": true,
                "mode": mode,
                "result": result,
            }),
            ToolEnvelope::Failure { mode, error } => serde_json::json!({
                "success": false,
                "mode": mode,
                "error": error,
            }),
        }
    }
}

impl Serialize for ToolEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ToolEnvelope", 3)?;
        match self {
            ToolEnvelope::Success { mode, result } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("mode", mode)?;
                state.serialize_field("result", result)?;
            }
            ToolEnvelope::Failure { mode, error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("mode", mode)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Flat wire shape used to deserialize a [`ToolEnvelope`].
#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    mode: Mode,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<RawEnvelope> for ToolEnvelope {
    type Error = String;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        if raw.success {
            Ok(ToolEnvelope::Success {
                mode: raw.mode,
                result: raw.result,
            })
        } else {
            let error = raw
                .error
                .ok_or_else(|| "failure envelope is missing `error`".to_string())?;
            Ok(ToolEnvelope::Failure {
                mode: raw.mode,
                error,
            })
        }
    }
}
