//! Chart-of-accounts index used by the classifier.

use std::collections::HashMap;

use tracing::debug;

/// One usable row of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    /// GL account number.
    pub number: String,
    /// Human-readable account description.
    pub description: String,
}

impl ChartEntry {
    /// Build an entry, returning `None` when either value is blank.
    pub fn new(number: &str, description: &str) -> Option<Self> {
        let number = number.trim();
        let description = description.trim();
        if number.is_empty() || description.is_empty() {
            return None;
        }
        Some(Self {
            number: number.to_string(),
            description: description.to_string(),
        })
    }
}

/// Shortcut categories derived from account descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Sample,
    FreeGoods,
    Advertising,
    Rebate,
    Invasion,
    Allowance,
    Incentive,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 7] = [
        KeywordCategory::Sample,
        KeywordCategory::FreeGoods,
        KeywordCategory::Advertising,
        KeywordCategory::Rebate,
        KeywordCategory::Invasion,
        KeywordCategory::Allowance,
        KeywordCategory::Incentive,
    ];

    /// Substrings of a lowercased account description that assign the
    /// account to this category.
    pub fn chart_keywords(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::Sample => &["sample"],
            KeywordCategory::FreeGoods => &["free"],
            KeywordCategory::Advertising => &["advertis", "pos", "marketing"],
            KeywordCategory::Rebate => &["rebate"],
            KeywordCategory::Invasion => &["invasion fee", "slotting"],
            KeywordCategory::Allowance => &["allowance", "discount", "off invoice"],
            KeywordCategory::Incentive => &["incentive"],
        }
    }
}

/// Read-only lookup structure built once per run.
#[derive(Debug, Clone, Default)]
pub struct GlAccountIndex {
    descriptions: Vec<String>,
    by_description: HashMap<String, String>,
    keywords: HashMap<KeywordCategory, String>,
}

impl GlAccountIndex {
    /// Build the index from chart rows in sheet order.
    ///
    /// Each keyword category keeps the first account whose description
    /// matches it. A description listed twice maps to its last number.
    pub fn build(entries: impl IntoIterator<Item = ChartEntry>) -> Self {
        let mut index = Self::default();

        for entry in entries {
            let lowered = entry.description.to_lowercase();
            for category in KeywordCategory::ALL {
                if category.chart_keywords().iter().any(|k| lowered.contains(k)) {
                    index
                        .keywords
                        .entry(category)
                        .or_insert_with(|| entry.number.clone());
                }
            }

            if !index.by_description.contains_key(&entry.description) {
                index.descriptions.push(entry.description.clone());
            }
            index.by_description.insert(entry.description, entry.number);
        }

        debug!(
            accounts = index.descriptions.len(),
            keyword_categories = index.keywords.len(),
            "built GL account index"
        );
        index
    }

    /// Known account descriptions, in chart order.
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Account number for an exact description.
    pub fn account_for_description(&self, description: &str) -> Option<&str> {
        self.by_description.get(description).map(String::as_str)
    }

    /// Account number assigned to a keyword category, if any.
    pub fn keyword_account(&self, category: KeywordCategory) -> Option<&str> {
        self.keywords.get(&category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(rows: &[(&str, &str)]) -> Vec<ChartEntry> {
        rows.iter().filter_map(|(n, d)| ChartEntry::new(n, d)).collect()
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        assert!(ChartEntry::new("", "Rebates").is_none());
        assert!(ChartEntry::new("6100", "  ").is_none());
        assert_eq!(
            ChartEntry::new(" 6100 ", "Rebates").unwrap().number,
            "6100"
        );
    }

    #[test]
    fn test_keyword_categories_first_match_wins() {
        let index = GlAccountIndex::build(entries(&[
            ("5000", "Cost of Goods Sold"),
            ("5100", "Samples & Donations"),
            ("5150", "Free Goods"),
            ("5200", "Advertising / POS Materials"),
            ("5250", "Marketing Programs"),
            ("5300", "Customer Rebates"),
            ("5400", "Invasion Fee"),
            ("5500", "Retail Price Allowance"),
            ("5550", "Off Invoice Discount"),
            ("5600", "Sales Incentive"),
        ]));

        assert_eq!(index.keyword_account(KeywordCategory::Sample), Some("5100"));
        assert_eq!(index.keyword_account(KeywordCategory::FreeGoods), Some("5150"));
        assert_eq!(index.keyword_account(KeywordCategory::Advertising), Some("5200"));
        assert_eq!(index.keyword_account(KeywordCategory::Rebate), Some("5300"));
        assert_eq!(index.keyword_account(KeywordCategory::Invasion), Some("5400"));
        assert_eq!(index.keyword_account(KeywordCategory::Allowance), Some("5500"));
        assert_eq!(index.keyword_account(KeywordCategory::Incentive), Some("5600"));
        assert_eq!(index.len(), 10);
    }

    #[test]
    fn test_missing_category() {
        let index = GlAccountIndex::build(entries(&[("5000", "Cost of Goods Sold")]));
        assert_eq!(index.keyword_account(KeywordCategory::Rebate), None);
        assert_eq!(index.account_for_description("Cost of Goods Sold"), Some("5000"));
    }

    #[test]
    fn test_duplicate_description_keeps_last_number() {
        let index = GlAccountIndex::build(entries(&[("1", "Freight"), ("2", "Freight")]));
        assert_eq!(index.descriptions(), &["Freight".to_string()]);
        assert_eq!(index.account_for_description("Freight"), Some("2"));
    }
}
