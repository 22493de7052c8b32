// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sonarmcp ask` command implementation.

use serde_json::Value;
use sonarmcp_config::SonarConfig;
use sonarmcp_core::{SonarError, ToolEnvelope};
use sonarmcp_mcp_server::{ChatArgs, Dispatcher};

use crate::serve::{build_dispatcher, init_tracing};

/// Run one query through the same dispatch path the MCP tool uses.
pub async fn run_ask(
    config: &SonarConfig,
    query: String,
    schema: Option<&str>,
) -> Result<ToolEnvelope, SonarError> {
    init_tracing(&config.server.log_level);
    let schema = parse_schema(schema)?;
    let dispatcher = build_dispatcher(config)?;
    Ok(dispatch_once(&dispatcher, query, schema).await)
}

fn parse_schema(raw: Option<&str>) -> Result<Option<Value>, SonarError> {
    Ok(raw.map(serde_json::from_str::<Value>).transpose()?)
}

async fn dispatch_once(dispatcher: &Dispatcher, query: String, schema: Option<Value>) -> ToolEnvelope {
    dispatcher.dispatch(&ChatArgs { query, schema }).await
}

/// Pretty JSON for the terminal.
pub fn render_envelope(envelope: &ToolEnvelope) -> String {
    format!("{:#}", envelope.to_json())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::json;
    use sonarmcp_core::Mode;
    use sonarmcp_test_utils::MockProvider;

    #[test]
    fn schema_argument_is_parsed() {
        assert_eq!(parse_schema(None).unwrap(), None);
        assert_eq!(
            parse_schema(Some(r#"{"type":"object"}"#)).unwrap(),
            Some(json!({"type": "object"}))
        );
        assert!(matches!(
            parse_schema(Some("{not json")),
            Err(SonarError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn ask_dispatches_once_and_renders() {
        let provider = MockProvider::with_responses(vec!["42".into()]);
        let dispatcher =
            Dispatcher::from_config(&SonarConfig::default(), Arc::new(provider.clone()));

        let env = dispatch_once(&dispatcher, "thống kê dân số".into(), None).await;
        assert_eq!(env.mode(), Mode::Analysis);
        assert_eq!(provider.requests().await.len(), 1);

        let rendered: Value = serde_json::from_str(&render_envelope(&env)).unwrap();
        assert_eq!(rendered, json!({"success": true, "mode": "analysis", "result": "42"}));
    }
}
