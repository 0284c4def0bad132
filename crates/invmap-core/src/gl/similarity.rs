//! Pluggable string similarity for fuzzy account matching.

use crate::models::config::SimilarityKind;

/// A similarity measure on a 0.0 - 1.0 scale, where 1.0 means identical.
pub trait StringSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Levenshtein distance normalized by the longer string's length.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl StringSimilarity for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Sørensen–Dice coefficient over character bigrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SorensenDice;

impl StringSimilarity for SorensenDice {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::sorensen_dice(a, b)
    }
}

/// Similarity implementation for a configured kind.
pub fn similarity_for(kind: SimilarityKind) -> Box<dyn StringSimilarity> {
    match kind {
        SimilarityKind::Levenshtein => Box::new(NormalizedLevenshtein),
        SimilarityKind::SorensenDice => Box::new(SorensenDice),
    }
}

/// Best-scoring candidate at or above `threshold`. Ties go to the earlier candidate.
pub fn best_match<'a>(
    similarity: &dyn StringSimilarity,
    query: &str,
    candidates: &'a [String],
    threshold: f64,
) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = similarity.similarity(query, candidate);
        if score < threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate.as_str(), score)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misspelling_clears_threshold() {
        let score = NormalizedLevenshtein.similarity("Retail Price Allowence", "Retail Price Allowance");
        assert!(score >= 0.86, "score was {}", score);
    }

    #[test]
    fn test_best_match_prefers_highest_score() {
        let candidates = vec![
            "Freight In".to_string(),
            "Freight Out".to_string(),
            "Fuel Surcharge".to_string(),
        ];
        let found = best_match(&NormalizedLevenshtein, "Freight Out", &candidates, 0.5);
        assert_eq!(found.map(|(c, _)| c), Some("Freight Out"));
    }

    #[test]
    fn test_best_match_respects_threshold() {
        let candidates = vec!["Cost of Goods Sold".to_string()];
        assert!(best_match(&NormalizedLevenshtein, "Widget Case", &candidates, 0.86).is_none());
        assert!(best_match(&SorensenDice, "Widget Case", &candidates, 0.86).is_none());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let candidates = vec!["abcd".to_string(), "abce".to_string()];
        let found = best_match(&NormalizedLevenshtein, "abcx", &candidates, 0.5);
        assert_eq!(found.map(|(c, _)| c), Some("abcd"));
    }

    #[test]
    fn test_similarity_for_kind() {
        let sim = similarity_for(SimilarityKind::SorensenDice);
        assert_eq!(sim.similarity("same", "same"), 1.0);
    }
}
