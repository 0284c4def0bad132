//! Core library for converting distributor invoice statements into
//! GL-coded purchase rows.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract, with lopdf as a fallback)
//! - Invoice block segmentation and line-item extraction
//! - GL account classification against a chart of accounts
//! - Row assembly and CSV / XLSX / JSON output

pub mod error;
pub mod gl;
pub mod invoice;
pub mod models;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod reference;

pub use error::{InvmapError, Result};
pub use gl::{ChartEntry, Classification, GlAccountIndex, GlClassifier};
pub use invoice::{BlockInvoiceParser, ExtractionResult, InvoiceParser};
pub use models::config::PipelineConfig;
pub use models::invoice::{InvoiceBlock, LineItem, ParsedInvoice};
pub use models::row::OutputRow;
pub use output::{write_table, write_table_as, OutputFormat, RecordAssembler};
pub use pdf::TextExtractor;
pub use pipeline::{FileReport, Pipeline, RunReport};
pub use reference::{load_chart_of_accounts, load_required_headers};
