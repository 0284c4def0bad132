//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// Load a document, decrypting PDFs protected with an empty password.
///
/// The flag reports whether decryption took place.
fn load_document(data: &[u8]) -> Result<(Document, bool)> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let encrypted = doc.is_encrypted();
    if encrypted {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");
    }

    if doc.get_pages().is_empty() {
        return Err(PdfError::NoPages);
    }

    Ok((doc, encrypted))
}

/// Page-by-page text extraction with lopdf.
///
/// Fast, but text placed on separate lines may come back joined without a
/// separator, so it is only used as a fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextExtractor;

impl TextExtractor for LopdfTextExtractor {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let (doc, _) = load_document(data)?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let pages = page_numbers
            .into_iter()
            .map(|number| match doc.extract_text(&[number]) {
                Ok(text) => text,
                Err(e) => {
                    trace!("page {} text extraction failed: {}", number, e);
                    String::new()
                }
            })
            .collect();

        Ok(pages)
    }
}

/// Layout-aware extraction with pdf-extract. Keeps line breaks between text
/// lines, which the item table parser depends on.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutTextExtractor;

impl TextExtractor for LayoutTextExtractor {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let (mut doc, decrypted) = load_document(data)?;

        // pdf-extract cannot decrypt, so hand it the decrypted bytes.
        let bytes = if decrypted {
            let mut buf = Vec::new();
            doc.save_to(&mut buf)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            buf
        } else {
            data.to_vec()
        };

        pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
