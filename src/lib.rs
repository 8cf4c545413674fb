// src/lib.rs
pub mod classify;
pub mod config;
pub mod datasets;
pub mod error;
pub mod matching;
pub mod models;
pub mod pipeline;

// Re-export common types for easier access
pub use config::LinkageParams;
pub use datasets::Dataset;
pub use error::LinkageError;
pub use models::{
    MatchLabel, RankedSignature, Record, RecordKey, RecordPair, Signature, SignatureDistribution,
    SimilarityLevel,
};

// Re-export important functionality
pub use pipeline::{link_datasets, LinkageStats};
