//! Data models shared across the pipeline.

pub mod config;
pub mod invoice;
pub mod row;

pub use config::{ChartConfig, ClassificationConfig, PipelineConfig, SimilarityKind};
pub use invoice::{InvoiceBlock, LineItem, ParsedInvoice};
pub use row::{Cell, OutputRow};
