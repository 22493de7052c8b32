// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP server for sonarmcp.
//!
//! [`Dispatcher`] turns a query into exactly one completion call and a
//! [`ToolEnvelope`](sonarmcp_core::ToolEnvelope); [`SonarMcpServer`]
//! exposes it as the `perplexity_chat` tool over stdio.

pub mod dispatch;
pub mod handler;

pub use dispatch::{ChatArgs, Dispatcher};
pub use handler::{SonarMcpServer, serve_stdio};
