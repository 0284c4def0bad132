//! Invoice block extraction from raw document text.

mod items;
mod normalize;
mod parser;
mod segmenter;
pub mod rules;

pub use items::LineItemExtractor;
pub use normalize::NormalizedText;
pub use parser::{BlockInvoiceParser, ExtractionResult, InvoiceParser};
pub use segmenter::BlockSegmenter;
