// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request assembly from a classified mode.
//!
//! Each mode selects a preset (model tier, search flag, recency window);
//! a caller-supplied schema adds a structured-output directive in any mode.

use serde_json::Value;
use sonarmcp_config::RoutingConfig;
use sonarmcp_core::{ChatMessage, ChatRequest, Mode, ResponseFormat};
use tracing::debug;

/// Downstream parameters selected by a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Model identifier.
    pub model: String,
    /// `Some(true)` when search augmentation is enabled; `None` leaves it unset.
    pub search: Option<bool>,
    /// Recency window in days, `search-pro` only.
    pub search_recency_days: Option<u32>,
}

/// Builds [`ChatRequest`]s from a query, its mode, and an optional schema.
#[derive(Debug, Clone)]
pub struct RequestRouter {
    config: RoutingConfig,
}

impl RequestRouter {
    /// Create a new router with the given configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// The preset a mode maps to.
    ///
    /// | mode        | model    | search | recency |
    /// |-------------|----------|--------|---------|
    /// | chat        | base     | -      | -       |
    /// | search-lite | base     | true   | -       |
    /// | search-pro  | enhanced | true   | N days  |
    /// | analysis    | enhanced | true   | -       |
    pub fn preset(&self, mode: Mode) -> Preset {
        match mode {
            Mode::Chat => Preset {
                model: self.config.base_model.clone(),
                search: None,
                search_recency_days: None,
            },
            Mode::SearchLite => Preset {
                model: self.config.base_model.clone(),
                search: Some(true),
                search_recency_days: None,
            },
            Mode::SearchPro => Preset {
                model: self.config.enhanced_model.clone(),
                search: Some(true),
                search_recency_days: Some(self.config.recency_days),
            },
            Mode::Analysis => Preset {
                model: self.config.enhanced_model.clone(),
                search: Some(true),
                search_recency_days: None,
            },
        }
    }

    /// Assemble the request payload.
    ///
    /// The query becomes the single user message unmodified. A schema attaches
    /// a `json_schema` response format only if it is a JSON object (including
    /// `{}`) or `true`; any other value counts as absent.
    pub fn build(&self, query: &str, mode: Mode, schema: Option<&Value>) -> ChatRequest {
        let preset = self.preset(mode);
        let response_format = schema
            .filter(|s| is_schema(s))
            .map(|s| ResponseFormat::json_schema(s.clone()));

        debug!(
            mode = %mode,
            model = preset.model.as_str(),
            structured = response_format.is_some(),
            "request assembled"
        );

        ChatRequest {
            messages: vec![ChatMessage::user(query)],
            model: preset.model,
            search: preset.search,
            search_recency_days: preset.search_recency_days,
            response_format,
        }
    }
}

/// JSON Schema documents are objects or booleans; `false` rejects everything.
fn is_schema(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Bool(true))
}

impl Default for RequestRouter {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}
