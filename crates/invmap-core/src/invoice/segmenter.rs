//! Splits document text into one block per invoice.

use tracing::debug;

use super::normalize::NormalizedText;
use super::rules::{extract_invoice_date, AnchorExtractor, FieldExtractor};
use crate::models::invoice::InvoiceBlock;

/// Segments normalized text on `Account: ... Invoice#: ...` anchors.
pub struct BlockSegmenter {
    anchors: AnchorExtractor,
}

impl BlockSegmenter {
    pub fn new() -> Self {
        Self {
            anchors: AnchorExtractor::new(),
        }
    }

    /// One block per anchor, in document order.
    ///
    /// A block runs from the end of its anchor to the start of the next anchor
    /// (or end of text). Text without anchors yields no blocks.
    pub fn segment(&self, text: &NormalizedText<'_>) -> Vec<InvoiceBlock> {
        let flat = text.flat();
        let anchors = self.anchors.extract_all(flat);

        let blocks: Vec<InvoiceBlock> = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                let end = anchors.get(i + 1).map_or(flat.len(), |next| next.start);
                let section = text.raw_span(anchor.end..end);

                InvoiceBlock {
                    account: anchor.value.account.clone(),
                    invoice_number: anchor.value.invoice_number.clone(),
                    invoice_date: extract_invoice_date(section),
                    raw_item_section: section.to_string(),
                }
            })
            .collect();

        debug!(blocks = blocks.len(), chars = flat.len(), "segmented invoice text");
        blocks
    }
}

impl Default for BlockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}
