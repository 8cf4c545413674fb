// src/error.rs
use thiserror::Error;

/// Fatal error kinds raised by the linkage pipeline.
///
/// Every structural inconsistency aborts the whole run: skipping bad rows
/// silently would corrupt the estimated signature frequencies.
#[derive(Debug, Error)]
pub enum LinkageError {
    #[error("record key '{key}' not found in dataset '{dataset}'")]
    Lookup { dataset: String, key: String },

    #[error("training pair set is empty; cannot estimate signature frequencies")]
    EmptyTrainingSet,

    #[error(
        "field count mismatch: '{left}' has {left_fields} comparable fields, \
         '{right}' has {right_fields}"
    )]
    SchemaMismatch {
        left: String,
        left_fields: usize,
        right: String,
        right_fields: usize,
    },

    #[error("{name} must lie within [0.0, 1.0], got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("dataset '{dataset}' has no '{column}' column required for city blocking")]
    MissingColumn { dataset: String, column: String },
}
