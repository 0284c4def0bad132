//! Rule-based field extractors for distributor invoice text.

pub mod anchors;
pub mod dates;
pub mod lines;
pub mod patterns;

pub use anchors::{Anchor, AnchorExtractor};
pub use dates::{extract_invoice_date, DateExtractor};
pub use lines::{parse_item_line, ItemLineExtractor, LineTier};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset just past the match.
    pub end: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, matched: regex::Match<'_>) -> Self {
        Self {
            value,
            start: matched.start(),
            end: matched.end(),
            source: matched.as_str().to_string(),
        }
    }
}
