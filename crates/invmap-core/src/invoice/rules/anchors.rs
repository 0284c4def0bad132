//! "Account: <digits> Invoice#: <id>" anchors that open each invoice block.

use super::patterns::{ACCOUNT_LABEL, INVOICE_ANCHOR, INVOICE_LABEL};
use super::{ExtractionMatch, FieldExtractor};

/// Header identifiers carried by one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub account: String,
    pub invoice_number: String,
}

/// Anchor extractor.
pub struct AnchorExtractor;

impl AnchorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Whether the text can contain an anchor at all.
    pub fn has_labels(text: &str) -> bool {
        text.contains(ACCOUNT_LABEL) && text.contains(INVOICE_LABEL)
    }
}

impl Default for AnchorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AnchorExtractor {
    type Output = ExtractionMatch<Anchor>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        if !Self::has_labels(text) {
            return Vec::new();
        }

        INVOICE_ANCHOR
            .captures_iter(text)
            .filter_map(|caps| {
                let anchor = Anchor {
                    account: caps["account"].to_string(),
                    invoice_number: caps["invoice"].to_string(),
                };
                Some(ExtractionMatch::new(anchor, caps.get(0)?))
            })
            .collect()
    }
}
