// src/matching/similarity.rs
use strsim::jaro_winkler;

use crate::models::SimilarityLevel;

// Category bounds over the normalized Jaro-Winkler score.
const MEDIUM_SIMILARITY_THRESHOLD: f64 = 0.5;
const HIGH_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Compares two field values and discretizes the similarity score into an
/// ordinal category.
///
/// Jaro-Winkler is case-sensitive but tolerant of typos and transpositions;
/// scores land in [0, 1] with 1.0 for identical strings. An empty (or
/// whitespace-only) value on either side yields `Low` without consulting
/// the metric, so missing data never inflates a signature.
pub fn similarity_level(a: &str, b: &str) -> SimilarityLevel {
    let a = a.trim();
    let b = b.trim();
    if a.is_empty() || b.is_empty() {
        return SimilarityLevel::Low;
    }

    let score = jaro_winkler(a, b);
    if score >= HIGH_SIMILARITY_THRESHOLD {
        SimilarityLevel::High
    } else if score >= MEDIUM_SIMILARITY_THRESHOLD {
        SimilarityLevel::Medium
    } else {
        SimilarityLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values_are_high() {
        assert_eq!(
            similarity_level("Art's Deli", "Art's Deli"),
            SimilarityLevel::High
        );
    }

    #[test]
    fn test_transposed_typo_is_high() {
        // jaro_winkler("martha", "marhta") ~= 0.961
        assert_eq!(similarity_level("martha", "marhta"), SimilarityLevel::High);
    }

    #[test]
    fn test_partial_overlap_is_medium() {
        // jaro_winkler("dixon", "dicksonx") ~= 0.814
        assert_eq!(similarity_level("dixon", "dicksonx"), SimilarityLevel::Medium);
    }

    #[test]
    fn test_disjoint_values_are_low() {
        // No characters in common: the score bottoms out at 0.0.
        assert_eq!(similarity_level("nobu", "art's deli"), SimilarityLevel::Low);
    }

    #[test]
    fn test_empty_values_are_low() {
        assert_eq!(similarity_level("", "Spago"), SimilarityLevel::Low);
        assert_eq!(similarity_level("Spago", ""), SimilarityLevel::Low);
        assert_eq!(similarity_level("", ""), SimilarityLevel::Low);
        assert_eq!(similarity_level("   ", "Spago"), SimilarityLevel::Low);
    }
}
