//! Configuration structures for the conversion pipeline.

use serde::{Deserialize, Serialize};

/// Default vendor label written to every row.
pub const DEFAULT_VENDOR: &str = "Big Geyser Inc.";

/// Default payment terms written to every row.
pub const DEFAULT_TERMS: &str = "CHAIN 30";

/// Main configuration for the invmap pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Emit step-by-step diagnostics (per file, per extractor).
    pub verbose: bool,

    /// Retry with the secondary text extractor when the primary yields no text.
    pub use_secondary_extractor: bool,

    /// Descend into subfolders when scanning for PDFs.
    pub recursive: bool,

    /// Vendor label for the `vendorRef` column.
    pub vendor: String,

    /// Payment terms for the `termsRef` column.
    pub terms: String,

    /// GL classification settings.
    pub classification: ClassificationConfig,

    /// Chart-of-accounts column layout.
    pub chart: ChartConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            use_secondary_extractor: false,
            recursive: false,
            vendor: DEFAULT_VENDOR.to_string(),
            terms: DEFAULT_TERMS.to_string(),
            classification: ClassificationConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

/// Fuzzy matching settings used after the keyword rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Minimum similarity (0.0 - 1.0) a chart description must reach.
    pub fuzzy_threshold: f64,

    /// Similarity measure used for fuzzy matching.
    pub similarity: SimilarityKind,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.86,
            similarity: SimilarityKind::default(),
        }
    }
}

/// Available string similarity measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityKind {
    /// Edit distance normalized to 0.0 - 1.0.
    #[default]
    Levenshtein,
    /// Sørensen–Dice coefficient over character bigrams.
    SorensenDice,
}

/// Header names of the two chart-of-accounts columns the index is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Preferred worksheet name; the first sheet is used when absent.
    pub sheet: String,

    /// Column holding the GL account number.
    pub number_column: String,

    /// Column holding the account description.
    pub description_column: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sheet: "ChartofAccounts".to_string(),
            number_column: "Number".to_string(),
            description_column: "Account (invoices)".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"recursive": true, "classification": {"similarity": "sorensen_dice"}}"#)
                .unwrap();

        assert!(config.recursive);
        assert_eq!(config.vendor, DEFAULT_VENDOR);
        assert_eq!(config.classification.similarity, SimilarityKind::SorensenDice);
        assert_eq!(config.classification.fuzzy_threshold, 0.86);
        assert_eq!(config.chart.number_column, "Number");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PipelineConfig::default();
        config.terms = "NET 30".to_string();
        config.save(&path).unwrap();

        let loaded = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(loaded.terms, "NET 30");
        assert!(!loaded.use_secondary_extractor);
    }
}
