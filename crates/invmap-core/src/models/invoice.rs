//! Invoice data extracted from distributor PDFs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description used for the synthetic item of a free-goods invoice.
pub const FREE_GOODS_DESCRIPTION: &str = "FREE GOODS - NO CHARGE TO CUSTOMER";

/// The text span belonging to one invoice within a multi-invoice PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBlock {
    /// Customer account number from the anchor.
    pub account: String,

    /// Invoice number from the anchor.
    pub invoice_number: String,

    /// Invoice date found inside the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,

    /// Raw, line-preserving text between this anchor and the next.
    pub raw_item_section: String,
}

/// One purchased entry within an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Distributor item number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Free-text description.
    pub description: String,

    /// Ordered quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item, clamping the quantity to at least 1.
    pub fn new(sku: Option<String>, description: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku,
            description: description.into(),
            quantity: quantity.max(1),
        }
    }

    /// The placeholder item emitted for a free-goods invoice without a table.
    pub fn free_goods() -> Self {
        Self::new(None, FREE_GOODS_DESCRIPTION, 1)
    }
}

/// Header fields and items of one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// Customer account number.
    pub account: String,

    /// Invoice number, used as the transaction id.
    pub invoice_number: String,

    /// Invoice date, when one could be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,

    /// Items in extraction order; may be empty.
    pub items: Vec<LineItem>,
}

impl ParsedInvoice {
    /// Consume a block, keeping its header fields alongside the extracted items.
    pub fn from_block(block: InvoiceBlock, items: Vec<LineItem>) -> Self {
        Self {
            account: block.account,
            invoice_number: block.invoice_number,
            invoice_date: block.invoice_date,
            items,
        }
    }
}
