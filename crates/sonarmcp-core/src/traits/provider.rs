// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for hosted chat-completion APIs.

use async_trait::async_trait;

use crate::error::SonarError;
use crate::types::{ChatRequest, Completion};

/// A hosted chat-completion service.
///
/// Implementations are constructed once at startup and shared across
/// invocations; each `complete` call is an independent single request.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Returns the human-readable name of this provider.
    fn name(&self) -> &str;

    /// Sends one completion request and returns the first choice's content.
    async fn complete(&self, request: ChatRequest) -> Result<Completion, SonarError>;
}
