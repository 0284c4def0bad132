//! Tabular output sinks: CSV, XLSX and JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::OutputError;
use crate::models::row::{Cell, OutputRow};

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Supported destination formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    /// Infer the format from a destination's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Write rows projected onto `headers`, choosing the format from the extension.
pub fn write_table(path: &Path, headers: &[String], rows: &[OutputRow]) -> Result<()> {
    let format =
        OutputFormat::from_path(path).ok_or_else(|| OutputError::UnsupportedFormat(path.to_path_buf()))?;
    write_table_as(path, format, headers, rows)
}

/// Write rows projected onto `headers` in an explicit format.
pub fn write_table_as(
    path: &Path,
    format: OutputFormat,
    headers: &[String],
    rows: &[OutputRow],
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Csv => write_csv(BufWriter::new(File::create(path)?), headers, rows)?,
        OutputFormat::Xlsx => write_xlsx(path, headers, rows)?,
        OutputFormat::Json => write_json(BufWriter::new(File::create(path)?), headers, rows)?,
    }

    debug!(path = %path.display(), ?format, rows = rows.len(), "wrote output table");
    Ok(())
}

/// Write a CSV table; absent cells are empty fields.
pub fn write_csv<W: Write>(writer: W, headers: &[String], rows: &[OutputRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(headers)?;
    for row in rows {
        let fields: Vec<String> = row
            .project(headers)
            .into_iter()
            .map(|cell| cell.map(|c| c.to_string()).unwrap_or_default())
            .collect();
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a JSON array of objects keyed by header; absent cells are `null`.
pub fn write_json<W: Write>(writer: W, headers: &[String], rows: &[OutputRow]) -> Result<()> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.project(headers))
                .map(|(h, cell)| {
                    let value = cell.map_or(serde_json::Value::Null, |c| c.to_json());
                    (h.clone(), value)
                })
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn write_xlsx(path: &Path, headers: &[String], rows: &[OutputRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, cell) in row.project(headers).into_iter().enumerate() {
            let c = col as u16;
            match cell {
                None => {}
                Some(Cell::Text(s)) => {
                    worksheet.write_string(r, c, s)?;
                }
                Some(Cell::Integer(n)) => {
                    worksheet.write_number(r, c, n)?;
                }
                Some(Cell::Decimal(d)) => {
                    worksheet.write_number(r, c, d.to_f64().unwrap_or_default())?;
                }
                Some(Cell::Bool(b)) => {
                    worksheet.write_boolean(r, c, b)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
