//! Output rows in the accounting-import schema.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Column names of the fields the assembler populates.
pub mod columns {
    pub const TRAN_ID: &str = "tranId";
    pub const POSTING_PERIOD: &str = "postingPeriodRef";
    pub const VENDOR: &str = "vendorRef";
    pub const TRAN_DATE: &str = "tranDate";
    pub const PAYABLE_ACCOUNT: &str = "payableAccountRef";
    pub const TERMS: &str = "termsRef";
    pub const MEMO: &str = "memo";
    pub const ITEM_REF: &str = "purchaseItemline_itemRef";
    pub const QUANTITY: &str = "purchaseItemline_quantity";
    pub const SERIAL_NUMBERS: &str = "purchaseItemline_serialNumbers";
    pub const UNITS: &str = "purchaseitemline_unitsRef";
    pub const RATE: &str = "purchaseItemLine_rate";
    pub const AMOUNT: &str = "purchaseItemLine_amount";
    pub const LINE_MEMO: &str = "purchaseItemLine_memo";
    pub const DEPARTMENT: &str = "purchaseItemLine_departmentRef";
    pub const CLASS: &str = "purchaseItemLine_classRef";
    pub const LOCATION: &str = "purchaseItemLine_locationRef";
    pub const CUSTOMER: &str = "purchaseItemLine_customerRef";
    pub const IS_BILLABLE: &str = "purchaseItemLine_isBillable";
    pub const TAX_CODE: &str = "purchaseItemLine_taxCodeRef";
    pub const TAX_CODE_AMOUNT: &str = "purchaseItemLine_taxCodeAmount";

    /// Every column the assembler knows about, in import-file order.
    pub const ALL: [&str; 21] = [
        TRAN_ID,
        POSTING_PERIOD,
        VENDOR,
        TRAN_DATE,
        PAYABLE_ACCOUNT,
        TERMS,
        MEMO,
        ITEM_REF,
        QUANTITY,
        SERIAL_NUMBERS,
        UNITS,
        RATE,
        AMOUNT,
        LINE_MEMO,
        DEPARTMENT,
        CLASS,
        LOCATION,
        CUSTOMER,
        IS_BILLABLE,
        TAX_CODE,
        TAX_CODE_AMOUNT,
    ];
}

/// A typed output value. Absent cells are represented as `None` by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u32),
    Decimal(Decimal),
    Bool(bool),
}

impl Cell {
    /// JSON representation of the cell.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Cell::Text(s) => serde_json::Value::String(s.clone()),
            Cell::Integer(n) => serde_json::Value::from(*n),
            Cell::Decimal(d) => serde_json::Value::from(d.to_f64()),
            Cell::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Decimal(d) => write!(f, "{}", d),
            // Import templates expect capitalized booleans.
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
        }
    }
}

/// One (invoice, line item) record. Immutable once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub tran_id: String,
    pub posting_period: Option<String>,
    pub vendor: String,
    pub tran_date: Option<String>,
    pub terms: String,
    pub item_ref: Option<String>,
    pub quantity: u32,
    pub units: Option<String>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub memo: Option<String>,
    pub class_ref: String,
    pub is_billable: bool,
    pub tax_code_amount: Decimal,
}

impl OutputRow {
    /// Value of the named column, `None` when the column is absent for this row
    /// or is not one the assembler populates.
    pub fn cell(&self, column: &str) -> Option<Cell> {
        use columns::*;

        let text = |s: &str| Some(Cell::Text(s.to_string()));
        match column {
            TRAN_ID => text(&self.tran_id),
            POSTING_PERIOD => self.posting_period.as_deref().and_then(text),
            VENDOR => text(&self.vendor),
            TRAN_DATE => self.tran_date.as_deref().and_then(text),
            TERMS => text(&self.terms),
            ITEM_REF => self.item_ref.as_deref().and_then(text),
            QUANTITY => Some(Cell::Integer(self.quantity)),
            UNITS => self.units.as_deref().and_then(text),
            RATE => Some(Cell::Decimal(self.rate)),
            AMOUNT => Some(Cell::Decimal(self.amount)),
            LINE_MEMO => self.memo.as_deref().and_then(text),
            CLASS => text(&self.class_ref),
            IS_BILLABLE => Some(Cell::Bool(self.is_billable)),
            TAX_CODE_AMOUNT => Some(Cell::Decimal(self.tax_code_amount)),
            PAYABLE_ACCOUNT | MEMO | SERIAL_NUMBERS | DEPARTMENT | LOCATION | CUSTOMER
            | TAX_CODE => None,
            _ => None,
        }
    }

    /// Project the row onto an ordered header list.
    pub fn project(&self, headers: &[String]) -> Vec<Option<Cell>> {
        headers.iter().map(|h| self.cell(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> OutputRow {
        OutputRow {
            tran_id: "AB12".to_string(),
            posting_period: Some("Jan 2024".to_string()),
            vendor: "Big Geyser Inc.".to_string(),
            tran_date: None,
            terms: "CHAIN 30".to_string(),
            item_ref: Some("4501".to_string()),
            quantity: 10,
            units: Some("CASE".to_string()),
            rate: Decimal::new(0, 1),
            amount: Decimal::new(0, 1),
            memo: Some("Widget Case".to_string()),
            class_ref: "Unmapped".to_string(),
            is_billable: false,
            tax_code_amount: Decimal::new(0, 1),
        }
    }

    #[test]
    fn test_projection_follows_header_order() {
        let headers = vec![
            "purchaseItemline_quantity".to_string(),
            "tranId".to_string(),
            "tranDate".to_string(),
            "Custom Column".to_string(),
        ];

        let cells = sample_row().project(&headers);
        assert_eq!(
            cells,
            vec![
                Some(Cell::Integer(10)),
                Some(Cell::Text("AB12".to_string())),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_cell_rendering() {
        let row = sample_row();
        assert_eq!(row.cell(columns::RATE).unwrap().to_string(), "0.0");
        assert_eq!(row.cell(columns::IS_BILLABLE).unwrap().to_string(), "False");
        assert_eq!(row.cell(columns::DEPARTMENT), None);
        assert_eq!(
            row.cell(columns::QUANTITY).unwrap().to_json(),
            serde_json::json!(10)
        );
    }

    #[test]
    fn test_header_names_are_distinct() {
        let mut names = columns::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), columns::ALL.len());
    }
}
