//! End-to-end conversion: PDF folder to GL-coded rows.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::error::{InvmapError, Result};
use crate::gl::{similarity_for, GlAccountIndex, GlClassifier, StringSimilarity};
use crate::invoice::{BlockInvoiceParser, ExtractionResult, InvoiceParser};
use crate::models::config::PipelineConfig;
use crate::models::row::OutputRow;
use crate::output::RecordAssembler;
use crate::pdf::{read_pdf_text, LayoutTextExtractor, LopdfTextExtractor, TextExtractor};

/// Outcome of converting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// No text could be extracted; the file contributed nothing.
    pub skipped: bool,
    pub invoices: usize,
    pub rows: Vec<OutputRow>,
}

/// Accumulated outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub invoices_found: usize,
    pub rows: Vec<OutputRow>,
}

impl RunReport {
    /// Fold one file's outcome into the totals, keeping row order.
    pub fn record(&mut self, report: FileReport) {
        self.files_scanned += 1;
        if report.skipped {
            self.files_skipped += 1;
        }
        self.invoices_found += report.invoices;
        self.rows.extend(report.rows);
    }
}

/// The conversion pipeline. Holds everything that stays fixed for a run.
pub struct Pipeline {
    config: PipelineConfig,
    index: GlAccountIndex,
    similarity: Box<dyn StringSimilarity>,
    parser: BlockInvoiceParser,
    primary: Box<dyn TextExtractor>,
    secondary: Option<Box<dyn TextExtractor>>,
    assembler: RecordAssembler,
}

impl Pipeline {
    /// Create a pipeline over a chart-of-accounts index.
    ///
    /// Text comes from pdf-extract; lopdf is tried on files where that finds
    /// nothing, when `use_secondary_extractor` is set.
    pub fn new(config: PipelineConfig, index: GlAccountIndex) -> Self {
        let secondary: Option<Box<dyn TextExtractor>> = if config.use_secondary_extractor {
            Some(Box::new(LopdfTextExtractor))
        } else {
            None
        };

        Self {
            similarity: similarity_for(config.classification.similarity),
            parser: BlockInvoiceParser::new(),
            primary: Box::new(LayoutTextExtractor),
            secondary,
            assembler: RecordAssembler::new(config.vendor.clone(), config.terms.clone()),
            config,
            index,
        }
    }

    /// Replace the text extractors.
    pub fn with_extractors(
        mut self,
        primary: Box<dyn TextExtractor>,
        secondary: Option<Box<dyn TextExtractor>>,
    ) -> Self {
        self.primary = primary;
        self.secondary = secondary;
        self
    }

    /// List the PDFs in `dir` in sorted order. The extension match ignores case.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(InvmapError::InputNotFound(dir.to_path_buf()));
        }

        let base = Pattern::escape(&dir.to_string_lossy());
        let suffix = if self.config.recursive { "**/*.pdf" } else { "*.pdf" };
        let pattern = format!("{}/{}", base.trim_end_matches('/'), suffix);

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        let entries = glob::glob_with(&pattern, options)
            .map_err(|e| InvmapError::Config(format!("invalid search pattern {}: {}", pattern, e)))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        debug!(count = files.len(), dir = %dir.display(), "discovered PDF files");
        Ok(files)
    }

    /// Raw text of a PDF, empty when nothing can be extracted.
    pub fn read_text(&self, path: &Path) -> String {
        read_pdf_text(path, self.primary.as_ref(), self.secondary.as_deref())
    }

    /// Parse a document's text and assemble its rows.
    pub fn process_text(&self, text: &str) -> (ExtractionResult, Vec<OutputRow>) {
        let classifier = GlClassifier::new(&self.index)
            .with_similarity(self.similarity.as_ref())
            .with_threshold(self.config.classification.fuzzy_threshold);

        let result = self.parser.parse(text);
        let rows = result
            .invoices
            .iter()
            .flat_map(|invoice| self.assembler.assemble(invoice, &classifier))
            .collect();

        (result, rows)
    }

    /// Convert one PDF file.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = self.read_text(path);
        if text.trim().is_empty() {
            warn!("[{}] no extractable text, skipping", name);
            return FileReport {
                path: path.to_path_buf(),
                skipped: true,
                invoices: 0,
                rows: Vec::new(),
            };
        }

        let (result, rows) = self.process_text(&text);
        info!("[{}] parsed_invoices={}", name, result.invoices.len());
        debug!(
            items = result.item_count(),
            elapsed_ms = result.processing_time_ms,
            "[{}] parsed text",
            name
        );
        for warning in &result.warnings {
            debug!("[{}] {}", name, warning);
        }

        FileReport {
            path: path.to_path_buf(),
            skipped: false,
            invoices: result.invoices.len(),
            rows,
        }
    }

    /// Convert the given files in order, calling `on_file` after each one.
    pub fn run_files<F>(&self, files: &[PathBuf], mut on_file: F) -> RunReport
    where
        F: FnMut(&FileReport),
    {
        let mut report = RunReport::default();
        for file in files {
            let file_report = self.process_file(file);
            on_file(&file_report);
            report.record(file_report);
        }

        info!(
            files = report.files_scanned,
            invoices = report.invoices_found,
            rows = report.rows.len(),
            "run finished"
        );
        report
    }

    /// Convert every PDF in `dir`.
    pub fn run(&self, dir: &Path) -> Result<RunReport> {
        let files = self.discover(dir)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), "no PDF files found");
        }
        Ok(self.run_files(&files, |_| {}))
    }
}
