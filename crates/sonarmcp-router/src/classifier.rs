// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based query classification.
//!
//! Maps a query to a [`Mode`] using ordered substring matching against four
//! keyword sets. No LLM pre-call, no network, no latency.

use sonarmcp_config::KeywordConfig;
use sonarmcp_core::Mode;

/// Keyword category that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Breaking news, disasters, conflicts.
    Breaking,
    /// Prices, markets, investment.
    Finance,
    /// Health, education, family life.
    Life,
    /// Tables, comparisons, reports.
    Analysis,
    /// Nothing matched.
    Default,
}

impl Category {
    /// Mode each category routes to.
    pub fn mode(self) -> Mode {
        match self {
            Category::Breaking => Mode::SearchPro,
            Category::Finance | Category::Life => Mode::SearchLite,
            Category::Analysis => Mode::Analysis,
            Category::Default => Mode::Chat,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Breaking => write!(f, "breaking"),
            Category::Finance => write!(f, "finance"),
            Category::Life => write!(f, "life"),
            Category::Analysis => write!(f, "analysis"),
            Category::Default => write!(f, "default"),
        }
    }
}

/// Result of classifying a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The selected mode.
    pub mode: Mode,
    /// Category whose keyword list matched first.
    pub category: Category,
    /// The keyword that matched, if any.
    pub matched_keyword: Option<String>,
}

/// Lower-cased keyword lists in priority order.
#[derive(Debug, Clone)]
pub struct KeywordSets {
    sets: Vec<(Category, Vec<String>)>,
}

impl KeywordSets {
    /// Builds keyword sets from config, lower-casing entries and dropping blanks.
    pub fn from_config(config: &KeywordConfig) -> Self {
        let normalize = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        Self {
            sets: vec![
                (Category::Breaking, normalize(&config.breaking)),
                (Category::Finance, normalize(&config.finance)),
                (Category::Life, normalize(&config.life)),
                (Category::Analysis, normalize(&config.analysis)),
            ],
        }
    }

    /// Keywords for one category (empty for [`Category::Default`]).
    pub fn keywords(&self, category: Category) -> &[String] {
        self.sets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self::from_config(&KeywordConfig::default())
    }
}

/// Deterministic, total query classifier.
#[derive(Debug, Clone, Default)]
pub struct QueryClassifier {
    keywords: KeywordSets,
}

impl QueryClassifier {
    /// Create a classifier with the built-in keyword vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from configured keyword lists.
    pub fn with_keywords(config: &KeywordConfig) -> Self {
        Self {
            keywords: KeywordSets::from_config(config),
        }
    }

    /// Classify a query. The first category (in priority order) with any
    /// keyword contained in the lower-cased query wins.
    pub fn classify(&self, query: &str) -> Classification {
        let lower = query.to_lowercase();

        for (category, words) in &self.keywords.sets {
            if let Some(hit) = words.iter().find(|w| lower.contains(w.as_str())) {
                return Classification {
                    mode: category.mode(),
                    category: *category,
                    matched_keyword: Some(hit.clone()),
                };
            }
        }

        Classification {
            mode: Mode::Chat,
            category: Category::Default,
            matched_keyword: None,
        }
    }

    /// Classify a query and return only the mode.
    pub fn classify_mode(&self, query: &str) -> Mode {
        self.classify(query).mode
    }

    /// The keyword sets in use.
    pub fn keywords(&self) -> &KeywordSets {
        &self.keywords
    }
}
