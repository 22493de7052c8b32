// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for sonarmcp.

use thiserror::Error;

/// The primary error type used across provider, routing, and server code.
///
/// At the tool boundary every variant collapses into a failure envelope
/// carrying the rendered message, so variants exist for logging and tests
/// rather than for caller-side branching.
#[derive(Debug, Error)]
pub enum SonarError {
    /// Configuration errors (missing API key, invalid header values, bad TOML).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat-completion provider errors (HTTP failure, API rejection, bad response body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON encoding or decoding failed outside the provider.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SonarError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        SonarError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
