// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sonarmcp serve` command implementation.
//!
//! Resolves the API key, builds the Perplexity provider and dispatcher once,
//! then serves the `perplexity_chat` tool over stdio until the client leaves.

use std::sync::Arc;

use sonarmcp_config::SonarConfig;
use sonarmcp_core::SonarError;
use sonarmcp_mcp_server::{Dispatcher, SonarMcpServer, serve_stdio};
use sonarmcp_perplexity::{PerplexityProvider, redaction_value, resolve_api_key};
use tracing::{error, info};

/// Runs the `sonarmcp serve` command.
pub async fn run_serve(config: SonarConfig) -> Result<(), SonarError> {
    init_tracing(&config.server.log_level);
    info!("starting sonarmcp serve");

    let dispatcher = match build_dispatcher(&config) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to initialize Perplexity provider");
            return Err(e);
        }
    };

    let server = SonarMcpServer::new(Arc::new(dispatcher), &config.server);
    serve_stdio(server).await?;

    info!("sonarmcp serve shutdown complete");
    Ok(())
}

/// Builds the dispatcher with the real provider; the resolved key is
/// registered for redaction.
pub fn build_dispatcher(config: &SonarConfig) -> Result<Dispatcher, SonarError> {
    let api_key = resolve_api_key(&config.perplexity.api_key)?;
    let provider = PerplexityProvider::with_api_key(&config.perplexity, &api_key)?;
    Ok(Dispatcher::from_config(config, Arc::new(provider))
        .with_redacted(vec![redaction_value(&api_key)]))
}

/// Installs the global subscriber. Output goes to stderr; stdout is the
/// MCP channel.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sonarmcp={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_dispatcher_uses_configured_key() {
        let mut config = SonarConfig::default();
        config.perplexity.api_key = Some("pplx-from-config-file".into());
        let dispatcher = build_dispatcher(&config).unwrap();
        assert_eq!(dispatcher.router().preset(sonarmcp_core::Mode::Chat).model, "sonar");
    }
}
