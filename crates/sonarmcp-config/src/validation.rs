// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty model ids, positive windows, and well-formed URLs.

use crate::diagnostic::ConfigError;
use crate::model::SonarConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SonarConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(validation("server.name must not be empty".to_string()));
    }

    let level = config.server.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(validation(format!(
            "server.log_level `{}` is not one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let url = config.perplexity.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(validation(format!(
            "perplexity.base_url `{url}` must start with http:// or https://"
        )));
    }

    if config.perplexity.timeout_secs == 0 {
        errors.push(validation(
            "perplexity.timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.routing.base_model.trim().is_empty() {
        errors.push(validation("routing.base_model must not be empty".to_string()));
    }

    if config.routing.enhanced_model.trim().is_empty() {
        errors.push(validation(
            "routing.enhanced_model must not be empty".to_string(),
        ));
    }

    if config.routing.recency_days == 0 {
        errors.push(validation(
            "routing.recency_days must be at least 1".to_string(),
        ));
    }

    let keyword_lists = [
        ("breaking", &config.keywords.breaking),
        ("finance", &config.keywords.finance),
        ("life", &config.keywords.life),
        ("analysis", &config.keywords.analysis),
    ];
    for (name, list) in keyword_lists {
        if list.iter().all(|k| k.trim().is_empty()) {
            errors.push(validation(format!(
                "keywords.{name} must contain at least one non-empty keyword"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = SonarConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_recency_fails_validation() {
        let mut config = SonarConfig::default();
        config.routing.recency_days = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "recency_days"));
    }

    #[test]
    fn empty_model_fails_validation() {
        let mut config = SonarConfig::default();
        config.routing.enhanced_model = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "enhanced_model"));
    }

    #[test]
    fn bad_base_url_fails_validation() {
        let mut config = SonarConfig::default();
        config.perplexity.base_url = "api.perplexity.ai".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "base_url"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SonarConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "log_level"));
    }

    #[test]
    fn blank_keyword_list_fails_validation() {
        let mut config = SonarConfig::default();
        config.keywords.life = vec!["".to_string(), "   ".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "keywords.life"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = SonarConfig::default();
        config.routing.recency_days = 0;
        config.perplexity.timeout_secs = 0;
        config.server.name = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = SonarConfig::default();
        config.perplexity.base_url = "http://127.0.0.1:8080/chat/completions".to_string();
        config.routing.recency_days = 7;
        config.server.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
