//! Invoice date extraction ("Mon Jan 15, 2024").

use chrono::NaiveDate;
use regex::Captures;

use super::patterns::INVOICE_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // Only the first textual date counts; an unparseable one is not skipped over.
        let caps = INVOICE_DATE.captures(text)?;
        let date = parse_captured_date(&caps)?;
        Some(ExtractionMatch::new(date, caps.get(0)?))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INVOICE_DATE
            .captures_iter(text)
            .filter_map(|caps| {
                let date = parse_captured_date(&caps)?;
                Some(ExtractionMatch::new(date, caps.get(0)?))
            })
            .collect()
    }
}

/// Find the invoice date inside a block, if one is present and valid.
pub fn extract_invoice_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

// The weekday token is informational only; a mismatching weekday does not
// invalidate the date.
fn parse_captured_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    let normalized = format!("{} {} {}", &caps["month"], &caps["day"], &caps["year"]);
    NaiveDate::parse_from_str(&normalized, "%b %d %Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_invoice_date() {
        assert_eq!(
            extract_invoice_date("Route 7 Mon Jan 15, 2024 Driver 3"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_date_across_line_breaks() {
        assert_eq!(
            extract_invoice_date("Tue\nFeb  6,\n2024"),
            NaiveDate::from_ymd_opt(2024, 2, 6)
        );
    }

    #[test]
    fn test_invalid_dates_are_absent() {
        assert_eq!(extract_invoice_date("Mon Foo 15, 2024"), None);
        assert_eq!(extract_invoice_date("Thu Feb 30, 2024"), None);
        assert_eq!(extract_invoice_date("no date here"), None);
        assert_eq!(extract_invoice_date(""), None);
    }

    #[test]
    fn test_extract_all_skips_invalid() {
        let dates = DateExtractor::new().extract_all("Thu Feb 30, 2024 and Fri Mar 1, 2024");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].value, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(dates[0].source, "Fri Mar 1, 2024");
    }
}
