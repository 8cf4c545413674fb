// src/matching/signature.rs
use crate::datasets::Dataset;
use crate::error::LinkageError;
use crate::models::{Record, RecordKey, Signature};

use super::similarity::similarity_level;

/// Builds the comparison signature for two records already in hand.
///
/// Fields are compared positionally, preserving column order; the two
/// records must expose the same number of comparable fields.
pub fn signature_of_records(left: &Record, right: &Record) -> Result<Signature, LinkageError> {
    if left.fields.len() != right.fields.len() {
        return Err(LinkageError::SchemaMismatch {
            left: "left record".to_string(),
            left_fields: left.fields.len(),
            right: "right record".to_string(),
            right_fields: right.fields.len(),
        });
    }

    let levels = left
        .fields
        .iter()
        .zip(right.fields.iter())
        .map(|(a, b)| similarity_level(a, b))
        .collect();
    Ok(Signature(levels))
}

/// Looks both records up by key and builds the pair's signature.
///
/// A key absent from its dataset is a fatal lookup error: a training pair
/// referencing a nonexistent record means the inputs are inconsistent.
pub fn signature_for_pair(
    left: &RecordKey,
    right: &RecordKey,
    dataset_a: &Dataset,
    dataset_b: &Dataset,
) -> Result<Signature, LinkageError> {
    let record_a = dataset_a.record(left).ok_or_else(|| LinkageError::Lookup {
        dataset: dataset_a.name().to_string(),
        key: left.0.clone(),
    })?;
    let record_b = dataset_b.record(right).ok_or_else(|| LinkageError::Lookup {
        dataset: dataset_b.name().to_string(),
        key: right.0.clone(),
    })?;

    signature_of_records(record_a, record_b).map_err(|_| LinkageError::SchemaMismatch {
        left: dataset_a.name().to_string(),
        left_fields: record_a.fields.len(),
        right: dataset_b.name().to_string(),
        right_fields: record_b.fields.len(),
    })
}
