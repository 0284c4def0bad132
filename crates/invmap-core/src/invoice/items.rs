//! Line-item extraction from an invoice block.

use tracing::debug;

use super::rules::{FieldExtractor, ItemLineExtractor, FREE_GOODS_MARKER, ITEM_TABLE};
use crate::models::invoice::{InvoiceBlock, LineItem};

/// Locates the item table inside a block and parses its rows.
pub struct LineItemExtractor {
    rows: ItemLineExtractor,
}

impl LineItemExtractor {
    pub fn new() -> Self {
        Self {
            rows: ItemLineExtractor::new(),
        }
    }

    /// Items of one block, in table order.
    ///
    /// A block without table rows but with a "FREE GOODS" marker yields the
    /// single synthetic free-goods item; otherwise the result may be empty.
    pub fn extract(&self, block: &InvoiceBlock) -> Vec<LineItem> {
        let section = block.raw_item_section.as_str();

        let mut items = match ITEM_TABLE.captures(section) {
            Some(caps) => self.rows.extract_all(&caps["rows"]),
            None => Vec::new(),
        };

        if items.is_empty() && FREE_GOODS_MARKER.is_match(section) {
            debug!(invoice = %block.invoice_number, "no item rows, using free goods placeholder");
            items.push(LineItem::free_goods());
        }

        debug!(invoice = %block.invoice_number, items = items.len(), "extracted line items");
        items
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}
