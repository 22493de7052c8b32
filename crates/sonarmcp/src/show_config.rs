// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sonarmcp config` command implementation.

use sonarmcp_config::SonarConfig;
use sonarmcp_core::SonarError;

/// Render the effective configuration as TOML with the API key masked.
pub fn render(config: &SonarConfig) -> Result<String, SonarError> {
    let mut shown = config.clone();
    if let Some(key) = shown.perplexity.api_key.as_mut() {
        *key = mask(key);
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| SonarError::Internal(format!("failed to render config: {e}")))
}

fn mask(key: &str) -> String {
    let prefix: String = key.chars().take(5).collect();
    if key.chars().count() > 12 {
        format!("{prefix}****")
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_masked() {
        let mut config = SonarConfig::default();
        config.perplexity.api_key = Some("pplx-0123456789abcdef".into());
        let out = render(&config).unwrap();
        assert!(!out.contains("0123456789abcdef"), "got:\n{out}");
        assert!(out.contains("pplx-****"), "got:\n{out}");
    }

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(mask("abc"), "****");
    }

    #[test]
    fn output_is_loadable_config() {
        let out = render(&SonarConfig::default()).unwrap();
        assert!(out.contains("[routing]"));
        let parsed: SonarConfig = toml::from_str(&out).unwrap();
        assert_eq!(parsed.routing.enhanced_model, "sonar-pro");
        assert_eq!(parsed.keywords.breaking.len(), 16);
    }
}
