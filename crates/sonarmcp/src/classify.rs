// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sonarmcp classify` command implementation.
//!
//! Shows the mode and request preset a query would get. No network access.

use serde::Serialize;
use sonarmcp_config::SonarConfig;
use sonarmcp_core::Mode;
use sonarmcp_router::{QueryClassifier, RequestRouter};

/// Routing decision for one query, for `--json` output.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub mode: Mode,
    pub category: String,
    pub matched_keyword: Option<String>,
    pub model: String,
    pub search: Option<bool>,
    pub search_recency_days: Option<u32>,
}

pub fn report(config: &SonarConfig, query: &str) -> RouteReport {
    let classification = QueryClassifier::with_keywords(&config.keywords).classify(query);
    let preset = RequestRouter::new(config.routing.clone()).preset(classification.mode);

    RouteReport {
        mode: classification.mode,
        category: classification.category.to_string(),
        matched_keyword: classification.matched_keyword,
        model: preset.model,
        search: preset.search,
        search_recency_days: preset.search_recency_days,
    }
}

/// Run the `sonarmcp classify` command and return the text to print.
pub fn run_classify(config: &SonarConfig, query: &str, json: bool) -> String {
    let report = report(config, query);
    if json {
        return serde_json::to_value(&report)
            .map(|v| format!("{v:#}"))
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    }

    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    format!(
        "mode:      {}\ncategory:  {}\nmatched:   {}\nmodel:     {}\nsearch:    {}\nrecency:   {}",
        report.mode,
        report.category,
        opt(report.matched_keyword.clone()),
        report.model,
        opt(report.search.map(|s| s.to_string())),
        opt(report.search_recency_days.map(|d| format!("{d} days"))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn breaking_query_report() {
        let r = report(&SonarConfig::default(), "giá vàng hôm nay");
        assert_eq!(r.mode, Mode::SearchPro);
        assert_eq!(r.category, "breaking");
        assert_eq!(r.matched_keyword.as_deref(), Some("hôm nay"));
        assert_eq!(r.model, "sonar-pro");
        assert_eq!(r.search_recency_days, Some(3));
    }

    #[test]
    fn text_output_for_chat() {
        let out = run_classify(&SonarConfig::default(), "giải thích thuật toán quicksort", false);
        assert!(out.contains("mode:      chat"), "got:\n{out}");
        assert!(out.contains("matched:   -"), "got:\n{out}");
        assert!(out.contains("search:    -"), "got:\n{out}");
    }

    #[test]
    fn json_output() {
        let out = run_classify(&SonarConfig::default(), "so sánh giá điện thoại", true);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["mode"], json!("analysis"));
        assert_eq!(v["matched_keyword"], json!("so sánh"));
        assert_eq!(v["search"], json!(true));
        assert_eq!(v["search_recency_days"], json!(null));
    }
}
