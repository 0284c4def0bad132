//! Joins invoice headers, line items and GL codes into output rows.

use rust_decimal::Decimal;

use crate::gl::GlClassifier;
use crate::models::invoice::{LineItem, ParsedInvoice};
use crate::models::row::OutputRow;

/// Unit label written for items that carry a SKU.
pub const CASE_UNIT: &str = "CASE";

/// Builds one row per (invoice, item) pair.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    vendor: String,
    terms: String,
}

impl RecordAssembler {
    pub fn new(vendor: impl Into<String>, terms: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            terms: terms.into(),
        }
    }

    /// Rows for one invoice in item order. An invoice without items still
    /// yields a single row with empty item fields.
    pub fn assemble(&self, invoice: &ParsedInvoice, classifier: &GlClassifier<'_>) -> Vec<OutputRow> {
        if invoice.items.is_empty() {
            return vec![self.row(invoice, None, classifier)];
        }
        invoice
            .items
            .iter()
            .map(|item| self.row(invoice, Some(item), classifier))
            .collect()
    }

    fn row(
        &self,
        invoice: &ParsedInvoice,
        item: Option<&LineItem>,
        classifier: &GlClassifier<'_>,
    ) -> OutputRow {
        let sku = item.and_then(|i| i.sku.clone());
        let description = item.map(|i| i.description.clone());
        let quantity = item.map_or(1, |i| i.quantity);

        // No pricing is printed on these statements.
        let rate = Decimal::new(0, 1);
        let mut amount = rate * Decimal::from(quantity);
        // Multiplying by an integer drops the scale; keep one place.
        amount.rescale(1);

        OutputRow {
            tran_id: invoice.invoice_number.clone(),
            posting_period: invoice.invoice_date.map(|d| d.format("%b %Y").to_string()),
            vendor: self.vendor.clone(),
            tran_date: invoice.invoice_date.map(|d| d.format("%m/%d/%Y").to_string()),
            terms: self.terms.clone(),
            units: sku.as_ref().map(|_| CASE_UNIT.to_string()),
            item_ref: sku,
            quantity,
            rate,
            amount,
            class_ref: classifier.gl_code(description.as_deref().unwrap_or_default()),
            memo: description,
            is_billable: false,
            tax_code_amount: Decimal::new(0, 1),
        }
    }
}
