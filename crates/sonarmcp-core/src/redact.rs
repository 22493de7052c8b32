// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for error messages returned to tool callers.
//!
//! Regex patterns catch known key formats; exact-match values catch the
//! configured key even when it has no recognizable prefix.

use std::sync::LazyLock;

use regex::Regex;

/// Known secret patterns to redact from output.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Perplexity API keys: pplx-...
        r"pplx-[a-zA-Z0-9_\-]{16,}",
        // Generic secret keys: sk-...
        r"sk-[a-zA-Z0-9_\-]{20,}",
        // Bearer tokens in echoed headers
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using regex patterns and exact-match values.
pub fn redact(input: &str, secrets: &[String]) -> String {
    let mut result = input.to_string();

    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }

    // Longest first so a secret containing another is not partially replaced.
    let mut sorted: Vec<&String> = secrets.iter().collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for secret in sorted {
        if !secret.is_empty() {
            result = result.replace(secret.as_str(), REDACTED);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_perplexity_key() {
        let out = redact("bad key pplx-abcdefghijklmnop1234 given", &[]);
        assert_eq!(out, "bad key [REDACTED] given");
    }

    #[test]
    fn redacts_bearer_header() {
        let out = redact("header Authorization: Bearer abc.def.ghi-123", &[]);
        assert!(!out.contains("abc.def"), "got: {out}");
        assert!(out.contains(REDACTED));
    }

    #[test]
    fn redacts_exact_secret() {
        let out = redact("token=hunter2hunter2 rejected", &["hunter2hunter2".to_string()]);
        assert_eq!(out, "token=[REDACTED] rejected");
    }

    #[test]
    fn empty_secret_is_ignored() {
        assert_eq!(redact("nothing here", &[String::new()]), "nothing here");
    }

    #[test]
    fn plain_text_untouched() {
        let msg = "provider error: API returned 500 Internal Server Error: upstream";
        assert_eq!(redact(msg, &[]), msg);
    }
}
