//! Line-item description to GL account classification.

use tracing::trace;

use super::index::{GlAccountIndex, KeywordCategory};
use super::similarity::{best_match, NormalizedLevenshtein, StringSimilarity};

/// GL code written when no rule or fuzzy match applies.
pub const UNMAPPED: &str = "Unmapped";

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.86;

/// Keyword rules in precedence order: the first rule with a matching needle
/// decides the outcome.
const KEYWORD_RULES: [(KeywordCategory, &[&str]); 6] = [
    (
        KeywordCategory::Sample,
        &["free goods", "no charge", "sample", "samples", "donation"],
    ),
    (
        KeywordCategory::Advertising,
        &["advertis", "promo", "pos", "display"],
    ),
    (KeywordCategory::Rebate, &["rebate"]),
    (KeywordCategory::Invasion, &["slotting", "invasion"]),
    (
        KeywordCategory::Allowance,
        &["allowance", "discount", "off invoice"],
    ),
    (KeywordCategory::Incentive, &["incentive"]),
];

/// How a description was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A keyword rule fired. `account` is `None` when the chart has no account
    /// for the category.
    Keyword {
        category: KeywordCategory,
        account: Option<String>,
    },
    /// A chart description was similar enough.
    Fuzzy {
        description: String,
        account: String,
        score: f64,
    },
    /// Nothing matched.
    Unmapped,
}

impl Classification {
    /// The GL code to write, `"Unmapped"` when there is none.
    pub fn gl_code(&self) -> &str {
        match self {
            Classification::Keyword {
                account: Some(account),
                ..
            }
            | Classification::Fuzzy { account, .. } => account,
            _ => UNMAPPED,
        }
    }
}

/// Layered classifier: keyword rules, then fuzzy similarity, then unmapped.
pub struct GlClassifier<'a> {
    index: &'a GlAccountIndex,
    similarity: &'a dyn StringSimilarity,
    threshold: f64,
}

impl<'a> GlClassifier<'a> {
    /// Create a classifier over an index with the default similarity and threshold.
    pub fn new(index: &'a GlAccountIndex) -> Self {
        Self {
            index,
            similarity: &NormalizedLevenshtein,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Set the similarity measure used for fuzzy matching.
    pub fn with_similarity(mut self, similarity: &'a dyn StringSimilarity) -> Self {
        self.similarity = similarity;
        self
    }

    /// Set the minimum fuzzy similarity.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Classify a description.
    pub fn classify(&self, description: &str) -> Classification {
        if description.is_empty() {
            return Classification::Unmapped;
        }

        let lowered = description.to_lowercase();
        for (category, needles) in KEYWORD_RULES {
            if needles.iter().any(|needle| lowered.contains(needle)) {
                let account = self.index.keyword_account(category).map(str::to_string);
                trace!(?category, ?account, description, "keyword rule matched");
                return Classification::Keyword { category, account };
            }
        }

        let matched = best_match(
            self.similarity,
            description,
            self.index.descriptions(),
            self.threshold,
        );
        if let Some((chart_description, score)) = matched {
            if let Some(account) = self.index.account_for_description(chart_description) {
                trace!(chart_description, score, description, "fuzzy match");
                return Classification::Fuzzy {
                    description: chart_description.to_string(),
                    account: account.to_string(),
                    score,
                };
            }
        }

        Classification::Unmapped
    }

    /// GL code for a description, `"Unmapped"` when nothing applies.
    pub fn gl_code(&self, description: &str) -> String {
        self.classify(description).gl_code().to_string()
    }
}
