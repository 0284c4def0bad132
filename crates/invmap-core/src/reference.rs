//! Loading of reference tables: required output headers and the chart of accounts.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::error::ReferenceError;
use crate::gl::ChartEntry;
use crate::models::config::ChartConfig;

/// Result type for reference loading.
pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Label some header lists carry in their first cell.
const FIELD_NAME_LABEL: &str = "Field Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TabularFormat {
    Delimited,
    Workbook,
}

impl TabularFormat {
    fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Delimited),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(ReferenceError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read the ordered list of output column names.
///
/// Only the first column is used. Blank cells are skipped and a leading
/// "Field Name" label is discarded.
pub fn load_required_headers(path: &Path) -> Result<Vec<String>> {
    let rows = read_grid(path, None)?;

    let mut headers: Vec<String> = rows
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect();

    if headers.first().map(String::as_str) == Some(FIELD_NAME_LABEL) {
        headers.remove(0);
    }

    if headers.is_empty() {
        return Err(ReferenceError::NoHeaders(path.to_path_buf()));
    }

    info!(count = headers.len(), path = %path.display(), "loaded required headers");
    Ok(headers)
}

/// Read account number / description pairs from the chart of accounts.
///
/// The first row names the columns. Rows missing either value are dropped.
pub fn load_chart_of_accounts(path: &Path, config: &ChartConfig) -> Result<Vec<ChartEntry>> {
    let rows = read_grid(path, Some(&config.sheet))?;
    let mut rows = rows.into_iter();

    let header = rows.next().unwrap_or_default();
    let number_idx = column_index(&header, &config.number_column, path)?;
    let description_idx = column_index(&header, &config.description_column, path)?;

    let entries: Vec<ChartEntry> = rows
        .filter_map(|row| {
            let number = row.get(number_idx)?;
            let description = row.get(description_idx)?;
            ChartEntry::new(number, description)
        })
        .collect();

    info!(accounts = entries.len(), path = %path.display(), "loaded chart of accounts");
    Ok(entries)
}

fn column_index(header: &[String], name: &str, path: &Path) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| ReferenceError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// Read a table as rows of strings. For workbooks, `sheet` is used when it
/// exists, otherwise the first sheet.
fn read_grid(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    match TabularFormat::detect(path)? {
        TabularFormat::Delimited => read_delimited(path),
        TabularFormat::Workbook => read_workbook(path, sheet),
    }
}

fn read_delimited(path: &Path) -> Result<Vec<Vec<String>>> {
    let unreadable = |e: csv::Error| ReferenceError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    let mut rows: Vec<Vec<String>> = reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(unreadable)
        })
        .collect::<Result<_>>()?;

    // Spreadsheet exports often start with a UTF-8 byte order mark.
    if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
        if let Some(rest) = first.strip_prefix('\u{feff}') {
            *first = rest.to_string();
        }
    }

    Ok(rows)
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let unreadable = |e: calamine::Error| ReferenceError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut workbook = open_workbook_auto(path).map_err(unreadable)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let name = match sheet {
        Some(preferred) if sheet_names.iter().any(|n| n == preferred) => preferred.to_string(),
        _ => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ReferenceError::NoSheets(path.to_path_buf()))?,
    };
    debug!(sheet = %name, path = %path.display(), "reading worksheet");

    let range = workbook.worksheet_range(&name).map_err(unreadable)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.to_string(),
        Data::Int(n) => n.to_string(),
        // Account numbers stored as numbers come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_headers_drop_field_name_label_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "headers.csv",
            "Field Name\ntranId\n\npostingPeriodRef,ignored\n  vendorRef  \n",
        );

        assert_eq!(
            load_required_headers(&path).unwrap(),
            vec!["tranId", "postingPeriodRef", "vendorRef"]
        );
    }

    #[test]
    fn test_empty_headers_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "headers.csv", "Field Name\n");
        assert!(matches!(
            load_required_headers(&path),
            Err(ReferenceError::NoHeaders(_))
        ));
    }

    #[test]
    fn test_chart_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "chart.csv",
            "Type,Number,Account (invoices)\n\
             Expense,5100,Samples\n\
             Expense,,Orphan\n\
             Expense,5200,\n\
             Expense, 5300 ,Rebates\n",
        );

        let entries = load_chart_of_accounts(&path, &ChartConfig::default()).unwrap();
        assert_eq!(
            entries,
            vec![
                ChartEntry::new("5100", "Samples").unwrap(),
                ChartEntry::new("5300", "Rebates").unwrap(),
            ]
        );
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let chart = write(
            dir.path(),
            "chart.csv",
            "\u{feff}Number,Account (invoices)\n5100,Samples\n",
        );
        let entries = load_chart_of_accounts(&chart, &ChartConfig::default()).unwrap();
        assert_eq!(entries, vec![ChartEntry::new("5100", "Samples").unwrap()]);

        let headers = write(dir.path(), "headers.csv", "\u{feff}Field Name\ntranId\n");
        assert_eq!(load_required_headers(&headers).unwrap(), vec!["tranId"]);
    }

    #[test]
    fn test_chart_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "chart.csv", "Number,Name\n5100,Samples\n");

        match load_chart_of_accounts(&path, &ChartConfig::default()) {
            Err(ReferenceError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Account (invoices)")
            }
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_required_headers(&dir.path().join("headers.pdf")),
            Err(ReferenceError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            load_required_headers(&dir.path().join("missing.csv")),
            Err(ReferenceError::Unreadable { .. })
        ));
        assert!(matches!(
            load_chart_of_accounts(&dir.path().join("missing.xlsx"), &ChartConfig::default()),
            Err(ReferenceError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_integral_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(6100.0)), "6100");
        assert_eq!(cell_to_string(&Data::Float(61.5)), "61.5");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
