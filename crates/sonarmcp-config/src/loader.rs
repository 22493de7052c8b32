// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sonarmcp.toml` > `~/.config/sonarmcp/sonarmcp.toml` >
//! `/etc/sonarmcp/sonarmcp.toml` with environment variable overrides via `SONARMCP_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SonarConfig;

/// System-wide config file path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sonarmcp/sonarmcp.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "sonarmcp.toml";

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sonarmcp/sonarmcp.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sonarmcp/sonarmcp.toml` (system-wide)
/// 3. `~/.config/sonarmcp/sonarmcp.toml` (user XDG config)
/// 4. `./sonarmcp.toml` (local directory)
/// 5. `SONARMCP_*` environment variables
pub fn load_config() -> Result<SonarConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SonarConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SonarConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SonarConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SonarConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SonarConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SONARMCP_PERPLEXITY_API_KEY` must map to `perplexity.api_key`,
/// not `perplexity.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SONARMCP_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Maps a prefix-stripped env var name, already lowercased, to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ["server", "perplexity", "routing", "keywords"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
