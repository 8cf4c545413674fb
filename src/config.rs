// src/config.rs
use crate::error::LinkageError;

/// Column consulted when blocking candidate pairs on an exact city match.
pub const DEFAULT_CITY_COLUMN: &str = "city";

/// User-supplied error-rate bounds and blocking switch for one run.
#[derive(Debug, Clone)]
pub struct LinkageParams {
    /// Maximum tolerable false-positive mass: the cumulative unmatch-class
    /// probability spent on signatures labeled "match".
    pub mu: f64,
    /// Maximum tolerable false-negative mass: the cumulative match-class
    /// probability spent on signatures labeled "unmatch".
    pub lambda: f64,
    /// Skip candidate pairs whose city fields differ (exact, case-sensitive).
    pub block_on_city: bool,
    /// Column compared when `block_on_city` is set.
    pub city_column: String,
}

impl LinkageParams {
    pub fn new(mu: f64, lambda: f64, block_on_city: bool) -> Result<Self, LinkageError> {
        let params = Self {
            mu,
            lambda,
            block_on_city,
            city_column: DEFAULT_CITY_COLUMN.to_string(),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_city_column(mut self, column: impl Into<String>) -> Self {
        self.city_column = column.into();
        self
    }

    pub fn validate(&self) -> Result<(), LinkageError> {
        check_unit_interval("mu", self.mu)?;
        check_unit_interval("lambda", self.lambda)?;
        Ok(())
    }
}

pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), LinkageError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(LinkageError::InvalidParameter { name, value });
    }
    Ok(())
}
