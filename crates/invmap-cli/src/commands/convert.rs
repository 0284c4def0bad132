//! Convert command - turn a folder of invoice PDFs into GL-coded rows.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use invmap_core::models::config::PipelineConfig;
use invmap_core::output::{write_table_as, OutputFormat};
use invmap_core::{load_chart_of_accounts, load_required_headers, GlAccountIndex, Pipeline, RunReport};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Folder containing invoice PDFs
    #[arg(long)]
    invoices: PathBuf,

    /// File listing the required output columns (CSV, TXT or spreadsheet)
    #[arg(long)]
    headers: PathBuf,

    /// Chart of accounts (spreadsheet or CSV)
    #[arg(long)]
    gl: PathBuf,

    /// Destination CSV file
    #[arg(long)]
    out_csv: PathBuf,

    /// Optional second destination (.xlsx or .json)
    #[arg(long, alias = "out-xlsx")]
    out_secondary: Option<PathBuf>,

    /// Vendor label for every row
    #[arg(long)]
    vendor: Option<String>,

    /// Payment terms for every row
    #[arg(long)]
    terms: Option<String>,

    /// Also scan subfolders
    #[arg(long)]
    recursive: bool,

    /// Retry files without text using the lopdf extractor
    #[arg(long, alias = "use-plumber")]
    use_secondary_extractor: bool,

    /// Minimum similarity for fuzzy GL matches (0.0 - 1.0)
    #[arg(long)]
    fuzzy_threshold: Option<f64>,
}

impl ConvertArgs {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(vendor) = &self.vendor {
            config.vendor = vendor.clone();
        }
        if let Some(terms) = &self.terms {
            config.terms = terms.clone();
        }
        if let Some(threshold) = self.fuzzy_threshold {
            config.classification.fuzzy_threshold = threshold;
        }
        config.recursive |= self.recursive;
        config.use_secondary_extractor |= self.use_secondary_extractor;
    }
}

pub fn run(args: ConvertArgs, mut config: PipelineConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    args.apply(&mut config);

    if !(0.0..=1.0).contains(&config.classification.fuzzy_threshold) {
        anyhow::bail!(
            "Fuzzy threshold must be between 0.0 and 1.0, got {}",
            config.classification.fuzzy_threshold
        );
    }

    let secondary_format = match &args.out_secondary {
        Some(path) => Some(OutputFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!("Unsupported secondary output: {} (use .xlsx or .json)", path.display())
        })?),
        None => None,
    };

    // Reference data problems are fatal before any PDF is touched.
    let headers = load_required_headers(&args.headers)?;
    let chart = load_chart_of_accounts(&args.gl, &config.chart)?;
    let index = GlAccountIndex::build(chart);
    info!("Loaded {} headers and {} GL descriptions", headers.len(), index.len());
    if index.is_empty() {
        warn!("{} has no usable accounts, every row will be Unmapped", args.gl.display());
    }

    let pipeline = Pipeline::new(config, index);
    let files = pipeline.discover(&args.invoices)?;

    println!(
        "{} Found {} PDF files in {}",
        style("ℹ").blue(),
        files.len(),
        args.invoices.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let report = pipeline.run_files(&files, |file| {
        if let Some(name) = file.path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    write_table_as(&args.out_csv, OutputFormat::Csv, &headers, &report.rows)?;
    debug!("Wrote CSV to {}", args.out_csv.display());

    if let (Some(path), Some(format)) = (&args.out_secondary, secondary_format) {
        write_table_as(path, format, &headers, &report.rows)?;
        debug!("Wrote secondary output to {}", path.display());
    }

    print_summary(&args, &report, start);
    Ok(())
}

fn print_summary(args: &ConvertArgs, report: &RunReport, start: Instant) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.files_scanned,
        start.elapsed()
    );
    if report.files_skipped > 0 {
        println!(
            "  Skipped (no text): {}",
            style(report.files_skipped).yellow()
        );
    }
    println!("  Invoice blocks: {}", style(report.invoices_found).cyan());
    println!("  Rows written:   {}", style(report.rows.len()).cyan());
    println!("  CSV:            {}", args.out_csv.display());
    if let Some(path) = &args.out_secondary {
        println!("  Secondary:      {}", path.display());
    }

    if report.rows.is_empty() {
        eprintln!();
        eprintln!(
            "{} No rows produced. Check that the PDFs contain selectable text \
             (try --use-secondary-extractor) and that each invoice shows \
             'Account: <n> Invoice#: <id>'. Run with -v for per-file details.",
            style("!").yellow()
        );
    }
}
