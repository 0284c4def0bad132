//! Item-row parsing: strict pattern first, positional heuristic second.

use tracing::trace;

use super::FieldExtractor;
use super::patterns::{ITEM_LINE, SKU_PREFIX};
use crate::models::invoice::LineItem;

/// Which rule produced a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTier {
    /// `<sku> <description> <qty>` matched exactly.
    Primary,
    /// Quantity taken from the last character, SKU split best-effort.
    Fallback,
}

/// Parse one non-blank, trimmed row of the item table.
///
/// Every row yields an item. When the strict pattern fails, the last
/// character is always removed before the SKU split, whether or not it was a
/// digit, so rows with irregular trailing content lose one character of
/// description.
pub fn parse_item_line(line: &str) -> (LineItem, LineTier) {
    if let Some(caps) = ITEM_LINE.captures(line) {
        let quantity = caps["qty"].parse().unwrap_or(1);
        let item = LineItem::new(
            Some(caps["sku"].to_string()),
            caps["desc"].trim(),
            quantity,
        );
        return (item, LineTier::Primary);
    }

    let quantity = line
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(1);
    let rest = match line.char_indices().last() {
        Some((idx, _)) => line[..idx].trim(),
        None => "",
    };

    let item = match SKU_PREFIX.captures(rest) {
        Some(caps) => LineItem::new(Some(caps["sku"].to_string()), caps["desc"].trim(), quantity),
        None => LineItem::new(None, rest, quantity),
    };
    (item, LineTier::Fallback)
}

/// Item row extractor over the text of an item table.
pub struct ItemLineExtractor;

impl ItemLineExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ItemLineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ItemLineExtractor {
    type Output = LineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (item, tier) = parse_item_line(line);
                trace!(?tier, line, "parsed item row");
                item
            })
            .collect()
    }
}
