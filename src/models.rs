// src/models.rs
use std::collections::HashMap;
use std::fmt;

/// Dataset-local unique key of a record (the first CSV column, kept as text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(pub String);

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        RecordKey(s.to_string())
    }
}

/// One row of a dataset: the comparable field values in column order.
#[derive(Debug, Clone)]
pub struct Record {
    pub fields: Vec<String>,
}

/// An ordered pair of record keys, left from dataset A, right from dataset B.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordPair {
    pub left: RecordKey,
    pub right: RecordKey,
}

impl RecordPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: RecordKey(left.into()),
            right: RecordKey(right.into()),
        }
    }
}

/// Ordinal similarity category for one compared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SimilarityLevel {
    Low,
    Medium,
    High,
}

impl SimilarityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLevel::Low => "low",
            SimilarityLevel::Medium => "medium",
            SimilarityLevel::High => "high",
        }
    }
}

/// Discretized comparison vector for one candidate pair, one level per
/// compared field, in dataset column order.
///
/// Equality and hashing are structural, so all pairs sharing a signature
/// aggregate into the same bucket; `Ord` gives the deterministic tie-break
/// used when likelihood ratios are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(pub Vec<SimilarityLevel>);

impl Signature {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<&str> = self.0.iter().map(|l| l.as_str()).collect();
        write!(f, "({})", levels.join(", "))
    }
}

/// Relative signature frequencies within one label class; masses sum to 1.0
/// over the training pairs of that class.
pub type SignatureDistribution = HashMap<Signature, f64>;

/// One entry of the ranked signature list: a signature with its mass in each
/// training class.
#[derive(Debug, Clone)]
pub struct RankedSignature {
    pub signature: Signature,
    pub match_mass: f64,
    pub unmatch_mass: f64,
}

impl RankedSignature {
    /// Match mass relative to unmatch mass. A signature never seen among
    /// known unmatches is a certain match (positive infinity); a signature
    /// with no mass in either class ranks with the ratio-zero tail.
    pub fn likelihood_ratio(&self) -> f64 {
        if self.unmatch_mass > 0.0 {
            self.match_mass / self.unmatch_mass
        } else if self.match_mass > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

/// Decision label for a candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchLabel {
    Match,
    Unmatch,
    Possible,
}

impl MatchLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLabel::Match => "match",
            MatchLabel::Unmatch => "unmatch",
            MatchLabel::Possible => "possible match",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
