// src/classify/rank.rs
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{RankedSignature, Signature, SignatureDistribution};

/// Merges the two class distributions over the union of their signatures
/// and orders the result by descending likelihood ratio.
///
/// A signature present in only one distribution carries zero mass for the
/// other. Equal ratios (including the infinite-ratio head and the
/// zero-ratio tail) tie-break on the signature value itself, so the
/// ordering is total and reproducible across runs regardless of hash-map
/// iteration order.
pub fn rank_signatures(
    match_dist: &SignatureDistribution,
    unmatch_dist: &SignatureDistribution,
) -> Vec<RankedSignature> {
    let union: HashSet<&Signature> = match_dist.keys().chain(unmatch_dist.keys()).collect();

    let mut ranked: Vec<RankedSignature> = union
        .into_iter()
        .map(|signature| RankedSignature {
            signature: signature.clone(),
            match_mass: match_dist.get(signature).copied().unwrap_or(0.0),
            unmatch_mass: unmatch_dist.get(signature).copied().unwrap_or(0.0),
        })
        .collect();

    ranked.sort_by(|left, right| {
        right
            .likelihood_ratio()
            .partial_cmp(&left.likelihood_ratio())
            .unwrap_or(Ordering::Equal)
            .then_with(|| left.signature.cmp(&right.signature))
    });
    ranked
}
