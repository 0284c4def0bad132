//! Document-level parser: normalize, segment, extract items.

use std::time::Instant;

use tracing::{debug, info};

use super::items::LineItemExtractor;
use super::normalize::NormalizedText;
use super::segmenter::BlockSegmenter;
use crate::models::invoice::ParsedInvoice;

/// Result of parsing one document's text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Invoices in document order.
    pub invoices: Vec<ParsedInvoice>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Total line items across all invoices.
    pub fn item_count(&self) -> usize {
        self.invoices.iter().map(|inv| inv.items.len()).sum()
    }
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse every invoice contained in a document's text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser for multi-invoice distributor statements laid out as
/// `Account / Invoice#` blocks with an `ITEM# DESCRIPTION QTY` table.
pub struct BlockInvoiceParser {
    segmenter: BlockSegmenter,
    items: LineItemExtractor,
}

impl BlockInvoiceParser {
    pub fn new() -> Self {
        Self {
            segmenter: BlockSegmenter::new(),
            items: LineItemExtractor::new(),
        }
    }
}

impl Default for BlockInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for BlockInvoiceParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let normalized = NormalizedText::new(text);
        if normalized.is_empty() {
            warnings.push("No text to parse".to_string());
        }

        let blocks = self.segmenter.segment(&normalized);
        if blocks.is_empty() && !normalized.is_empty() {
            warnings.push("No Account/Invoice# anchors found".to_string());
        }

        let invoices: Vec<ParsedInvoice> = blocks
            .into_iter()
            .map(|block| {
                if block.invoice_date.is_none() {
                    warnings.push(format!("Invoice {}: no invoice date", block.invoice_number));
                }
                let items = self.items.extract(&block);
                if items.is_empty() {
                    warnings.push(format!("Invoice {}: no line items", block.invoice_number));
                }
                ParsedInvoice::from_block(block, items)
            })
            .collect();

        info!("found {} invoice blocks", invoices.len());
        debug!(warnings = warnings.len(), "parse finished");

        ExtractionResult {
            invoices,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::LineItem;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const STATEMENT: &str = "BIG GEYSER INC.\n\
        Mon Jan 15, 2024\n\
        Account: 1001 Invoice#: AB12\n\
        Mon Jan 15, 2024 Route 4\n\
        ITEM# DESCRIPTION QTY\n\
        ----------------------------\n\
        4501 Widget Case 10\n\
        Cases: 10\n\
        Account: 1002 Invoice#: AB13\n\
        Tue Jan 16, 2024\n\
        FREE GOODS\n\
        Account: 1003 Invoice#: AB14\n\
        credit memo\n";

    #[test]
    fn test_parse_statement() {
        let result = BlockInvoiceParser::new().parse(STATEMENT);

        assert_eq!(result.invoices.len(), 3);

        let first = &result.invoices[0];
        assert_eq!(first.account, "1001");
        assert_eq!(first.invoice_number, "AB12");
        assert_eq!(first.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(first.items, vec![LineItem::new(Some("4501".into()), "Widget Case", 10)]);

        let second = &result.invoices[1];
        assert_eq!(second.invoice_date, NaiveDate::from_ymd_opt(2024, 1, 16));
        assert_eq!(second.items, vec![LineItem::free_goods()]);

        let third = &result.invoices[2];
        assert!(third.items.is_empty());
        assert_eq!(third.invoice_date, None);

        assert_eq!(result.item_count(), 2);
        assert!(result.warnings.iter().any(|w| w.contains("AB14")));
    }

    #[test]
    fn test_flattened_input() {
        let text = "...Account: 1001 Invoice#: AB12 ... ITEM# DESCRIPTION QTY\n---\n4501 Widget Case 10\n... Cases: 10";
        let result = BlockInvoiceParser::new().parse(text);

        assert_eq!(result.invoices.len(), 1);
        assert_eq!(result.invoices[0].account, "1001");
        assert_eq!(result.invoices[0].invoice_number, "AB12");
        // The elided "..." row goes through the fallback rule like any other
        // table row: its last character is dropped and it gets quantity 1.
        assert_eq!(
            result.invoices[0].items,
            vec![
                LineItem::new(Some("4501".into()), "Widget Case", 10),
                LineItem::new(None, "..", 1),
            ]
        );
    }

    #[test]
    fn test_flattened_input_without_elision() {
        let text = "Account: 1001 Invoice#: AB12 Mon Jan 15, 2024 ITEM# DESCRIPTION QTY --- 4501 Widget Case 10 Cases: 10";
        let result = BlockInvoiceParser::new().parse(text);

        assert_eq!(result.invoices.len(), 1);
        assert_eq!(
            result.invoices[0].items,
            vec![LineItem::new(Some("4501".into()), "Widget Case", 10)]
        );
    }

    #[test]
    fn test_empty_text() {
        let result = BlockInvoiceParser::new().parse("");
        assert!(result.invoices.is_empty());
        assert_eq!(result.warnings, vec!["No text to parse".to_string()]);
    }
}
