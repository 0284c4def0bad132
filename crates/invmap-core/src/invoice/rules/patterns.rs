//! Common regex patterns for the distributor invoice layout.

use lazy_static::lazy_static;
use regex::Regex;

/// Literal labels every anchor contains; used as a cheap pre-check.
pub const ACCOUNT_LABEL: &str = "Account:";
pub const INVOICE_LABEL: &str = "Invoice#:";

lazy_static! {
    // Block anchor: "Account: 1001 Invoice#: AB12" (labels are case-sensitive)
    pub static ref INVOICE_ANCHOR: Regex = Regex::new(
        r"Account:\s*(?P<account>\d+)\s*Invoice#:\s*(?P<invoice>[0-9A-Z]+)"
    ).unwrap();

    // Invoice date: "Mon Jan 15, 2024"
    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?P<weekday>[A-Z][a-z]{2})\s+(?P<month>[A-Z][a-z]{2})\s+(?P<day>\d{1,2}),\s+(?P<year>\d{4})"
    ).unwrap();

    // Item table: header, dashed separator, rows up to "Cases:" / "FREE GOODS" / end
    pub static ref ITEM_TABLE: Regex = Regex::new(
        r"(?is)ITEM#\s*DESCRIPTION\s*QTY\s*-+\s*(?P<rows>.*?)\s*(?:Cases:|FREE GOODS|\z)"
    ).unwrap();

    // Well-formed item row: "4501 Widget Case 10"
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^(?P<sku>\d{3,})\s+(?P<desc>.*?)(?P<qty>\d+)$"
    ).unwrap();

    // Leading SKU on a row whose quantity has already been stripped
    pub static ref SKU_PREFIX: Regex = Regex::new(
        r"^(?P<sku>\d{3,})\s+(?P<desc>.+)"
    ).unwrap();

    pub static ref FREE_GOODS_MARKER: Regex = Regex::new(
        r"(?i)FREE GOODS"
    ).unwrap();
}
