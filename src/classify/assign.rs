// src/classify/assign.rs
use std::collections::HashMap;

use crate::config::check_unit_interval;
use crate::error::LinkageError;
use crate::models::{MatchLabel, RankedSignature, Signature};

/// Assigns a decision label to every ranked signature under the two
/// error-rate bounds.
///
/// Two greedy sweeps walk the ranked list from opposite ends:
///
/// - from the tail (least match-like), signatures are labeled "unmatch"
///   while the match-class mass given up that way stays within `lambda`,
///   the false-negative budget;
/// - from the head (most match-like), signatures are labeled "match" while
///   the unmatch-class mass admitted that way stays within `mu`, the
///   false-positive budget.
///
/// Each sweep stops at the first signature whose inclusion would overrun
/// its budget. The match sweep runs last, so "match" wins wherever both
/// sweeps reach; a budget of exactly 0 disables its sweep entirely.
/// Signatures reached by neither sweep stay "possible match", making the
/// returned mapping total over `ranked`. Signatures never seen in training
/// are the caller's responsibility and default to "possible match" there.
pub fn assign_labels(
    ranked: &[RankedSignature],
    mu: f64,
    lambda: f64,
) -> Result<HashMap<Signature, MatchLabel>, LinkageError> {
    check_unit_interval("mu", mu)?;
    check_unit_interval("lambda", lambda)?;

    let mut labels: HashMap<Signature, MatchLabel> = ranked
        .iter()
        .map(|entry| (entry.signature.clone(), MatchLabel::Possible))
        .collect();

    if lambda > 0.0 {
        let mut false_negative_mass = 0.0;
        for entry in ranked.iter().rev() {
            if false_negative_mass + entry.match_mass > lambda {
                break;
            }
            false_negative_mass += entry.match_mass;
            labels.insert(entry.signature.clone(), MatchLabel::Unmatch);
        }
    }

    if mu > 0.0 {
        let mut false_positive_mass = 0.0;
        for entry in ranked.iter() {
            if false_positive_mass + entry.unmatch_mass > mu {
                break;
            }
            false_positive_mass += entry.unmatch_mass;
            labels.insert(entry.signature.clone(), MatchLabel::Match);
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimilarityLevel::{High, Low, Medium};

    fn entry(
        levels: &[crate::models::SimilarityLevel],
        match_mass: f64,
        unmatch_mass: f64,
    ) -> RankedSignature {
        RankedSignature {
            signature: Signature(levels.to_vec()),
            match_mass,
            unmatch_mass,
        }
    }

    fn label_count(labels: &HashMap<Signature, MatchLabel>, wanted: MatchLabel) -> usize {
        labels.values().filter(|&&l| l == wanted).count()
    }

    #[test]
    fn test_two_signature_split() {
        // One certain match, one certain unmatch, generous budgets.
        let ranked = vec![
            entry(&[High, High], 1.0, 0.0),
            entry(&[Low, High], 0.0, 1.0),
        ];
        let labels = assign_labels(&ranked, 0.5, 0.5).unwrap();
        assert_eq!(
            labels[&Signature(vec![High, High])],
            MatchLabel::Match
        );
        assert_eq!(labels[&Signature(vec![Low, High])], MatchLabel::Unmatch);
    }

    #[test]
    fn test_zero_budgets_label_nothing() {
        let ranked = vec![
            entry(&[High, High], 1.0, 0.0),
            entry(&[Low, High], 0.0, 1.0),
        ];
        let labels = assign_labels(&ranked, 0.0, 0.0).unwrap();
        assert_eq!(labels.len(), 2);
        assert!(labels.values().all(|&l| l == MatchLabel::Possible));
    }

    #[test]
    fn test_budget_overrun_stops_the_sweep() {
        let ranked = vec![
            entry(&[High, High], 0.5, 0.1),
            entry(&[High, Medium], 0.3, 0.2),
            entry(&[Medium, Medium], 0.1, 0.2),
            entry(&[Low, Low], 0.1, 0.5),
        ];
        // mu admits 0.1 + 0.2 of unmatch mass but not 0.5 more.
        let labels = assign_labels(&ranked, 0.3, 0.0).unwrap();
        assert_eq!(labels[&Signature(vec![High, High])], MatchLabel::Match);
        assert_eq!(labels[&Signature(vec![High, Medium])], MatchLabel::Match);
        assert_eq!(
            labels[&Signature(vec![Medium, Medium])],
            MatchLabel::Possible
        );
        assert_eq!(labels[&Signature(vec![Low, Low])], MatchLabel::Possible);
    }

    #[test]
    fn test_match_wins_where_both_sweeps_reach() {
        let ranked = vec![
            entry(&[High, High], 0.6, 0.2),
            entry(&[Medium, High], 0.3, 0.3),
            entry(&[Low, Low], 0.1, 0.5),
        ];
        // Full budgets: both sweeps cover the entire list.
        let labels = assign_labels(&ranked, 1.0, 1.0).unwrap();
        assert!(labels.values().all(|&l| l == MatchLabel::Match));
        assert_eq!(label_count(&labels, MatchLabel::Unmatch), 0);
    }

    #[test]
    fn test_match_count_monotone_in_mu() {
        let ranked = vec![
            entry(&[High, High], 0.4, 0.1),
            entry(&[High, Medium], 0.3, 0.2),
            entry(&[Medium, Medium], 0.2, 0.3),
            entry(&[Low, Low], 0.1, 0.4),
        ];
        let mut previous = 0;
        for mu in [0.0, 0.1, 0.3, 0.6, 1.0] {
            let labels = assign_labels(&ranked, mu, 0.0).unwrap();
            let matches = label_count(&labels, MatchLabel::Match);
            assert!(matches >= previous, "match count shrank when mu rose to {}", mu);
            previous = matches;
        }
    }

    #[test]
    fn test_unmatch_count_monotone_in_lambda() {
        let ranked = vec![
            entry(&[High, High], 0.4, 0.1),
            entry(&[High, Medium], 0.3, 0.2),
            entry(&[Medium, Medium], 0.2, 0.3),
            entry(&[Low, Low], 0.1, 0.4),
        ];
        let mut previous = 0;
        for lambda in [0.0, 0.1, 0.3, 0.6, 1.0] {
            let labels = assign_labels(&ranked, 0.0, lambda).unwrap();
            let unmatches = label_count(&labels, MatchLabel::Unmatch);
            assert!(
                unmatches >= previous,
                "unmatch count shrank when lambda rose to {}",
                lambda
            );
            previous = unmatches;
        }
    }

    #[test]
    fn test_assignment_is_idempotent() {
        let ranked = vec![
            entry(&[High, High], 0.5, 0.1),
            entry(&[Medium, High], 0.3, 0.3),
            entry(&[Low, Low], 0.2, 0.6),
        ];
        let first = assign_labels(&ranked, 0.4, 0.4).unwrap();
        for _ in 0..5 {
            assert_eq!(assign_labels(&ranked, 0.4, 0.4).unwrap(), first);
        }
    }

    #[test]
    fn test_out_of_range_bounds_are_rejected() {
        let ranked = vec![entry(&[High, High], 1.0, 0.0)];
        assert!(matches!(
            assign_labels(&ranked, 1.2, 0.5),
            Err(LinkageError::InvalidParameter { name: "mu", .. })
        ));
        assert!(matches!(
            assign_labels(&ranked, 0.5, -0.2),
            Err(LinkageError::InvalidParameter { name: "lambda", .. })
        ));
    }
}
