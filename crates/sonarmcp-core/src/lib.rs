// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for sonarmcp.
//!
//! Provides the error type, the request/response types exchanged between
//! the router, the provider and the MCP server, the [`CompletionProvider`]
//! trait seam, and secret redaction for caller-visible error strings.

pub mod error;
pub mod redact;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SonarError;
pub use redact::redact;
pub use traits::CompletionProvider;
pub use types::{
    ChatMessage, ChatRequest, Completion, JsonSchemaFormat, Mode, ResponseFormat, TokenUsage,
    ToolEnvelope,
};
