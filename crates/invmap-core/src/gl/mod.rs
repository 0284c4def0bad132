//! General-ledger account classification.

mod classifier;
mod index;
pub mod similarity;

pub use classifier::{Classification, GlClassifier, DEFAULT_FUZZY_THRESHOLD, UNMAPPED};
pub use index::{ChartEntry, GlAccountIndex, KeywordCategory};
pub use similarity::{similarity_for, NormalizedLevenshtein, SorensenDice, StringSimilarity};
