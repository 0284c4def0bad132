//! Error types for the invmap-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the invmap library.
#[derive(Error, Debug)]
pub enum InvmapError {
    /// Reference data (headers list, chart of accounts) could not be loaded.
    #[error("reference data error: {0}")]
    Reference(#[from] ReferenceError),

    /// Writing the output table failed.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// The invoices folder does not exist or is not a directory.
    #[error("invoice folder not found: {0}")]
    InputNotFound(PathBuf),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while loading the required-headers list or the chart of accounts.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// The source file could not be opened or decoded.
    #[error("failed to read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// The workbook has no sheets at all.
    #[error("{0} contains no worksheets")]
    NoSheets(PathBuf),

    /// A column the loader depends on is not present in the header row.
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    /// The headers source yielded no column names.
    #[error("{0} does not list any output headers")]
    NoHeaders(PathBuf),

    /// The file extension does not name a supported tabular format.
    #[error("unsupported tabular format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Errors raised by the output sinks.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV writer failure.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX writer failure.
    #[error("XLSX write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization failure.
    #[error("JSON write failed: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while creating or writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The destination's extension does not name a supported sink.
    #[error("unsupported output format for {0}")]
    UnsupportedFormat(PathBuf),
}

/// Result type for the invmap library.
pub type Result<T> = std::result::Result<T, InvmapError>;
