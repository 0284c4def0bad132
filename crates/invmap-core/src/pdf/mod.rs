//! PDF text extraction.

mod extractor;
#[cfg(test)]
pub(crate) mod fixture;

pub use extractor::{LayoutTextExtractor, LopdfTextExtractor};

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction implementations.
pub trait TextExtractor {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Extract the whole document as one string, pages separated by newlines.
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        Ok(self.extract_pages(data)?.join("\n"))
    }
}

/// Run an extractor, turning a panic inside the PDF library into an error.
pub fn extract_guarded(extractor: &dyn TextExtractor, data: &[u8]) -> Result<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| extractor.extract_text(data))) {
        Ok(result) => result,
        Err(_) => Err(PdfError::TextExtraction(format!(
            "{} extractor panicked",
            extractor.name()
        ))),
    }
}

/// Read a PDF file's text. Never fails: unreadable files and documents
/// degrade to empty text.
///
/// `secondary` is only consulted when the primary extractor yields no
/// non-whitespace text.
pub fn read_pdf_text(
    path: &Path,
    primary: &dyn TextExtractor,
    secondary: Option<&dyn TextExtractor>,
) -> String {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), "failed to read file: {}", e);
            return String::new();
        }
    };

    let text = run_extractor(primary, &data, path);
    if !text.trim().is_empty() {
        return text;
    }

    match secondary {
        Some(secondary) => {
            debug!(path = %path.display(), "primary extractor found no text, trying {}", secondary.name());
            run_extractor(secondary, &data, path)
        }
        None => text,
    }
}

fn run_extractor(extractor: &dyn TextExtractor, data: &[u8], path: &Path) -> String {
    match extract_guarded(extractor, data) {
        Ok(text) => {
            debug!(
                path = %path.display(),
                extractor = extractor.name(),
                chars = text.len(),
                "extracted text"
            );
            text
        }
        Err(e) => {
            warn!(path = %path.display(), extractor = extractor.name(), "{}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the given pages regardless of input.
    struct Pages(&'static [&'static str]);

    impl TextExtractor for Pages {
        fn name(&self) -> &'static str {
            "pages"
        }

        fn extract_pages(&self, _data: &[u8]) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|page| page.to_string()).collect())
        }
    }

    struct Panicking;

    impl TextExtractor for Panicking {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn extract_pages(&self, _data: &[u8]) -> Result<Vec<String>> {
            panic!("malformed font table")
        }
    }

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_pages_joined_with_newline() {
        let pages = Pages(&["page one", "page two"]);
        assert_eq!(pages.extract_text(b"").unwrap(), "page one\npage two");
    }

    #[test]
    fn test_panic_becomes_error() {
        let err = extract_guarded(&Panicking, b"").unwrap_err();
        assert!(matches!(err, PdfError::TextExtraction(_)));
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let text = read_pdf_text(Path::new("/nonexistent/invoice.pdf"), &LopdfTextExtractor, None);
        assert!(text.is_empty());
    }

    #[test]
    fn test_garbage_bytes_read_as_empty() {
        let file = temp_file(b"this is not a pdf");
        let text = read_pdf_text(file.path(), &LayoutTextExtractor, Some(&LopdfTextExtractor));
        assert!(text.is_empty());
    }

    #[test]
    fn test_secondary_only_used_when_primary_is_empty() {
        let file = temp_file(b"%PDF-1.4");

        let secondary = Pages(&["secondary"]);

        let text = read_pdf_text(file.path(), &Pages(&["primary"]), Some(&secondary));
        assert_eq!(text, "primary");

        // Blank pages count as no text.
        let text = read_pdf_text(file.path(), &Pages(&["  ", "\n"]), Some(&secondary));
        assert_eq!(text, "secondary");

        let text = read_pdf_text(file.path(), &Panicking, Some(&secondary));
        assert_eq!(text, "secondary");

        let text = read_pdf_text(file.path(), &Pages(&[" "]), None);
        assert_eq!(text, " ");
    }
}
