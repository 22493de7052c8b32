// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for sonarmcp.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level sonarmcp configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SonarConfig {
    /// MCP server identity and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Perplexity API settings.
    #[serde(default)]
    pub perplexity: PerplexityConfig,

    /// Mode-to-preset routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Classifier keyword vocabulary.
    #[serde(default)]
    pub keywords: KeywordConfig,
}

/// MCP server identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Server name reported during the MCP handshake.
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Overrides the instructions string sent to MCP clients.
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            log_level: default_log_level(),
            instructions: None,
        }
    }
}

fn default_server_name() -> String {
    "sonarmcp".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Perplexity API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PerplexityConfig {
    /// Perplexity API key. `None` requires the `PERPLEXITY_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.perplexity.ai/chat/completions".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

/// Mode preset configuration.
///
/// `chat` and `search-lite` use the base model; `search-pro` and `analysis`
/// use the enhanced model. Only `search-pro` applies the recency window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model identifier for the base tier.
    #[serde(default = "default_base_model")]
    pub base_model: String,

    /// Model identifier for the enhanced tier.
    #[serde(default = "default_enhanced_model")]
    pub enhanced_model: String,

    /// Recency window in days applied to `search-pro` requests.
    #[serde(default = "default_recency_days")]
    pub recency_days: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_model: default_base_model(),
            enhanced_model: default_enhanced_model(),
            recency_days: default_recency_days(),
        }
    }
}

fn default_base_model() -> String {
    "sonar".to_string()
}

fn default_enhanced_model() -> String {
    "sonar-pro".to_string()
}

fn default_recency_days() -> u32 {
    3
}

/// Keyword vocabulary for the query classifier, one list per category.
///
/// Lists are checked in priority order: breaking, finance, life, analysis.
/// Defaults are tuned for Vietnamese queries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordConfig {
    /// Breaking-news and disaster terms; routes to `search-pro`.
    #[serde(default = "default_breaking_keywords")]
    pub breaking: Vec<String>,

    /// Prices, markets and finance terms; routes to `search-lite`.
    #[serde(default = "default_finance_keywords")]
    pub finance: Vec<String>,

    /// Health, education and family terms; routes to `search-lite`.
    #[serde(default = "default_life_keywords")]
    pub life: Vec<String>,

    /// Tables, comparisons and reports; routes to `analysis`.
    #[serde(default = "default_analysis_keywords")]
    pub analysis: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            breaking: default_breaking_keywords(),
            finance: default_finance_keywords(),
            life: default_life_keywords(),
            analysis: default_analysis_keywords(),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_breaking_keywords() -> Vec<String> {
    owned(&[
        "cập nhật",
        "mới nhất",
        "tình hình",
        "diễn biến",
        "breaking",
        "hiện tại",
        "hôm nay",
        "vừa xảy ra",
        "thiên tai",
        "bão",
        "lũ",
        "động đất",
        "cháy",
        "tai nạn",
        "chiến sự",
        "xung đột",
    ])
}

fn default_finance_keywords() -> Vec<String> {
    owned(&[
        "giá vàng",
        "btc",
        "crypto",
        "chứng khoán",
        "usd",
        "giá xăng",
        "thị trường",
        "đầu tư",
    ])
}

fn default_life_keywords() -> Vec<String> {
    owned(&[
        "sức khoẻ",
        "bệnh",
        "dịch",
        "tiêm",
        "giáo dục",
        "học sinh",
        "trường học",
        "gia đình",
    ])
}

fn default_analysis_keywords() -> Vec<String> {
    owned(&["so sánh", "bảng", "json", "thống kê", "report", "danh sách"])
}
