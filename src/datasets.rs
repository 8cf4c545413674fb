// src/datasets.rs
//
// CSV-backed data access. Datasets are loaded once at startup and held
// immutably in memory; the pipeline itself never touches the filesystem.
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use log::debug;
use std::io::Read;
use std::path::Path;

use crate::models::{Record, RecordKey, RecordPair};

/// One tabular dataset: a header row naming the comparable columns and one
/// keyed record per row, in file order.
///
/// The first CSV column is the record key; every remaining column is a
/// comparable text field. Insertion order is preserved so the output walk
/// over the cross product is deterministic.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    records: IndexMap<RecordKey, Record>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        records: IndexMap<RecordKey, Record>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            records,
        }
    }

    /// Reads a dataset from a CSV file with a header row.
    pub fn from_csv_path(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
        Self::from_csv_reader(name, file)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))
    }

    /// Reads a dataset from any CSV source with a header row.
    pub fn from_csv_reader(name: impl Into<String>, reader: impl Read) -> Result<Self> {
        let name = name.into();
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read header row of dataset '{}'", name))?;
        if headers.len() < 2 {
            bail!(
                "dataset '{}' needs a key column and at least one comparable column, found {}",
                name,
                headers.len()
            );
        }
        let columns: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

        let mut records: IndexMap<RecordKey, Record> = IndexMap::new();
        for (row_idx, row) in rdr.records().enumerate() {
            let row = row.with_context(|| {
                format!("Failed to parse row {} of dataset '{}'", row_idx + 2, name)
            })?;
            let key = RecordKey(row.get(0).unwrap_or("").to_string());
            let fields: Vec<String> = row.iter().skip(1).map(|f| f.to_string()).collect();
            if records.insert(key.clone(), Record { fields }).is_some() {
                bail!("dataset '{}' contains duplicate key '{}'", name, key);
            }
        }

        debug!(
            "Loaded dataset '{}': {} records, {} comparable columns",
            name,
            records.len(),
            columns.len()
        );
        Ok(Self {
            name,
            columns,
            records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the comparable columns, in comparison order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of comparable fields each record carries.
    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, key: &RecordKey) -> Option<&Record> {
        self.records.get(key)
    }

    /// Records in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &Record)> {
        self.records.iter()
    }

    /// Position of a named comparable column, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Reads a headerless (key_a, key_b) pair file, one labeled pair per row.
pub fn load_pairs_path(path: impl AsRef<Path>) -> Result<Vec<RecordPair>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open pair file {}", path.display()))?;
    load_pairs_reader(file).with_context(|| format!("Failed to read pair file {}", path.display()))
}

/// Reads headerless (key_a, key_b) pairs from any CSV source.
pub fn load_pairs_reader(reader: impl Read) -> Result<Vec<RecordPair>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row_idx, row) in rdr.deserialize::<(String, String)>().enumerate() {
        let (left, right) =
            row.with_context(|| format!("Failed to parse pair row {}", row_idx + 1))?;
        pairs.push(RecordPair::new(left, right));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csv() -> &'static str {
        "id,restaurant name,city,street address\n\
         1,Art's Deli,Los Angeles,12224 Ventura Blvd.\n\
         2,Spago,West Hollywood,8795 Sunset Blvd.\n"
    }

    #[test]
    fn test_dataset_load_preserves_order_and_columns() {
        let ds = Dataset::from_csv_reader("zagat", sample_csv().as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.columns(),
            &["restaurant name", "city", "street address"]
        );
        let keys: Vec<&str> = ds.iter().map(|(k, _)| k.0.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);
        let record = ds.record(&RecordKey::from("1")).unwrap();
        assert_eq!(record.fields[0], "Art's Deli");
        assert_eq!(ds.column_index("city"), Some(1));
        assert_eq!(ds.column_index("zip"), None);
    }

    #[test]
    fn test_dataset_rejects_duplicate_keys() {
        let csv = "id,name\n1,Spago\n1,Nobu\n";
        let err = Dataset::from_csv_reader("zagat", csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_dataset_rejects_key_only_schema() {
        let csv = "id\n1\n";
        assert!(Dataset::from_csv_reader("zagat", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_pair_file_is_headerless() {
        let csv = "1,7\n2,9\n";
        let pairs = load_pairs_reader(csv.as_bytes()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], RecordPair::new("1", "7"));
        assert_eq!(pairs[1], RecordPair::new("2", "9"));
    }
}
