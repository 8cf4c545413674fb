// src/classify/estimate.rs
use std::collections::HashMap;

use crate::datasets::Dataset;
use crate::error::LinkageError;
use crate::matching::signature_for_pair;
use crate::models::{RecordPair, Signature, SignatureDistribution};

/// Estimates the relative frequency of each signature among the given
/// labeled training pairs, weighting every pair 1/|pairs|.
///
/// Occurrences are counted as integers and divided once at the end, so the
/// result is identical regardless of pair iteration order. An empty pair
/// set cannot be normalized and is rejected outright rather than producing
/// NaN masses.
pub fn signature_frequencies(
    pairs: &[RecordPair],
    dataset_a: &Dataset,
    dataset_b: &Dataset,
) -> Result<SignatureDistribution, LinkageError> {
    if pairs.is_empty() {
        return Err(LinkageError::EmptyTrainingSet);
    }

    let mut counts: HashMap<Signature, usize> = HashMap::new();
    for pair in pairs {
        let signature = signature_for_pair(&pair.left, &pair.right, dataset_a, dataset_b)?;
        *counts.entry(signature).or_insert(0) += 1;
    }

    let total = pairs.len() as f64;
    Ok(counts
        .into_iter()
        .map(|(signature, count)| (signature, count as f64 / total))
        .collect())
}
