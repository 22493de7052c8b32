// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server handler exposing the `perplexity_chat` tool.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use sonarmcp_config::ServerConfig;
use sonarmcp_core::{SonarError, ToolEnvelope};
use tracing::info;

use crate::dispatch::{ChatArgs, Dispatcher};

const DEFAULT_INSTRUCTIONS: &str = "Ask Perplexity. perplexity_chat picks a mode from keywords in the query: \
chat (no search), search-lite (web search), search-pro (web search limited to recent sources, \
stronger model) or analysis (web search, stronger model). Pass `schema` to request JSON output. \
Results come back as {success, mode, result | error}.";

/// MCP server wrapping a shared [`Dispatcher`].
#[derive(Clone)]
pub struct SonarMcpServer {
    dispatcher: Arc<Dispatcher>,
    name: String,
    instructions: Option<String>,
    tool_router: ToolRouter<Self>,
}

impl SonarMcpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, config: &ServerConfig) -> Self {
        Self {
            dispatcher,
            name: config.name.clone(),
            instructions: config.instructions.clone(),
            tool_router: Self::tool_router(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Structured content for machine consumers plus a text copy for older clients.
fn envelope_result(envelope: &ToolEnvelope) -> CallToolResult {
    let payload = envelope.to_json();
    let mut r = CallToolResult::structured(payload.clone());
    r.content = vec![Content::text(payload.to_string())];
    r
}

#[tool_router]
impl SonarMcpServer {
    #[tool(
        name = "perplexity_chat",
        description = "Send a query to Perplexity. The mode is chosen from keywords in the query: \
breaking news (today, latest, storms...) -> search-pro; finance or life topics -> search-lite; \
comparisons, tables, reports -> analysis; otherwise chat. Optional `schema` (JSON Schema) requests \
structured JSON output in any mode. Returns {success, mode, result} or {success: false, mode, error}."
    )]
    pub async fn perplexity_chat(
        &self,
        Parameters(args): Parameters<ChatArgs>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = self.dispatcher.dispatch(&args).await;
        Ok(envelope_result(&envelope))
    }
}

#[tool_handler]
impl ServerHandler for SonarMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                self.instructions
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

/// Serve over stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: SonarMcpServer) -> Result<(), SonarError> {
    info!(name = server.name.as_str(), "serving MCP over stdio");
    let running = server
        .serve(stdio())
        .await
        .map_err(|e| SonarError::Internal(format!("MCP initialize failed: {e}")))?;
    let reason = running
        .waiting()
        .await
        .map_err(|e| SonarError::Internal(format!("MCP service task failed: {e}")))?;
    info!(reason = ?reason, "MCP client disconnected");
    Ok(())
}
