// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query dispatch: classify, assemble, call once, wrap in an envelope.
//!
//! [`Dispatcher::dispatch`] never fails. Every provider error becomes a
//! [`ToolEnvelope::Failure`] whose message has secrets redacted.

use std::sync::Arc;
use std::time::Instant;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use sonarmcp_config::SonarConfig;
use sonarmcp_core::{CompletionProvider, ToolEnvelope, redact};
use sonarmcp_router::{QueryClassifier, RequestRouter};
use tracing::{debug, info, warn};

/// Arguments of the `perplexity_chat` tool.
///
/// Unknown fields are rejected so a misplaced query (e.g. nested under
/// `input`) fails as invalid params instead of sending an empty query.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ChatArgs {
    /// The question or instruction to send. Keywords in it select the mode.
    #[serde(default)]
    pub query: String,

    /// Optional JSON Schema. When given, the answer is requested as JSON
    /// conforming to it, in any mode.
    #[serde(default)]
    pub schema: Option<Value>,
}

impl ChatArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Routes queries to the completion provider.
///
/// Holds only immutable state, so one instance is shared across calls.
#[derive(Clone)]
pub struct Dispatcher {
    classifier: QueryClassifier,
    router: RequestRouter,
    provider: Arc<dyn CompletionProvider>,
    secrets: Vec<String>,
}

impl Dispatcher {
    pub fn new(
        classifier: QueryClassifier,
        router: RequestRouter,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            classifier,
            router,
            provider,
            secrets: Vec::new(),
        }
    }

    /// Build a dispatcher from the keyword and routing sections of `config`.
    pub fn from_config(config: &SonarConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self::new(
            QueryClassifier::with_keywords(&config.keywords),
            RequestRouter::new(config.routing.clone()),
            provider,
        )
    }

    /// Register exact values to scrub from error messages.
    pub fn with_redacted(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    pub fn router(&self) -> &RequestRouter {
        &self.router
    }

    /// Handle one tool invocation.
    pub async fn dispatch(&self, args: &ChatArgs) -> ToolEnvelope {
        let started = Instant::now();
        let classification = self.classifier.classify(&args.query);
        let mode = classification.mode;

        debug!(
            mode = %mode,
            category = %classification.category,
            matched = classification.matched_keyword.as_deref().unwrap_or("-"),
            query = args.query.as_str(),
            "query classified"
        );

        let request = self.router.build(&args.query, mode, args.schema.as_ref());
        let model = request.model.clone();

        match self.provider.complete(request).await {
            Ok(completion) => {
                let (prompt_tokens, completion_tokens) = completion
                    .usage
                    .as_ref()
                    .map(|u| (u.prompt_tokens, u.completion_tokens))
                    .unwrap_or_default();
                info!(
                    mode = %mode,
                    model = model.as_str(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    prompt_tokens,
                    completion_tokens,
                    "dispatch ok"
                );
                ToolEnvelope::Success {
                    mode,
                    result: completion.content,
                }
            }
            Err(e) => {
                let error = redact(&e.to_string(), &self.secrets);
                warn!(
                    mode = %mode,
                    model = model.as_str(),
                    provider = self.provider.name(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    error = error.as_str(),
                    "dispatch failed"
                );
                ToolEnvelope::Failure { mode, error }
            }
        }
    }
}
