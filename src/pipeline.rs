// src/pipeline.rs
//
// End-to-end linkage run: estimate both class distributions from the
// labeled training pairs, rank the observed signatures, assign labels
// under the error-rate bounds, then emit one labeled row per candidate
// pair across the full (optionally city-blocked) cross product.
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::io::Write;
use std::time::Instant;

use crate::classify::{assign_labels, rank_signatures, signature_frequencies};
use crate::config::LinkageParams;
use crate::datasets::Dataset;
use crate::error::LinkageError;
use crate::matching::signature_of_records;
use crate::models::{MatchLabel, Record, RecordKey, RecordPair};

/// Outcome counters for one linkage run.
#[derive(Debug, Default, Clone)]
pub struct LinkageStats {
    pub rows_written: usize,
    pub match_count: usize,
    pub unmatch_count: usize,
    pub possible_count: usize,
    pub skipped_city_mismatch: usize,
    pub distinct_signatures: usize,
    pub processing_time: std::time::Duration,
}

/// Runs the full linkage pipeline and writes `(key_a, key_b, label)` CSV
/// rows to `output`, covering every candidate pair in dataset order (outer
/// loop over A, inner loop over B).
///
/// Candidate pairs whose signature never occurred among the training pairs
/// default to "possible match". With `block_on_city` set, pairs whose city
/// fields differ are skipped before labeling; the comparison is exact and
/// case-sensitive.
pub fn link_datasets<W: Write>(
    dataset_a: &Dataset,
    dataset_b: &Dataset,
    known_matches: &[RecordPair],
    known_unmatches: &[RecordPair],
    params: &LinkageParams,
    output: W,
) -> Result<LinkageStats> {
    let start_time = Instant::now();
    params.validate()?;
    validate_schema(dataset_a, dataset_b)?;
    let city_index = resolve_city_index(dataset_a, dataset_b, params)?;

    info!(
        "Estimating signature frequencies from {} known matches and {} known unmatches",
        known_matches.len(),
        known_unmatches.len()
    );
    let match_dist = signature_frequencies(known_matches, dataset_a, dataset_b)
        .context("Failed to estimate match-class signature frequencies")?;
    let unmatch_dist = signature_frequencies(known_unmatches, dataset_a, dataset_b)
        .context("Failed to estimate unmatch-class signature frequencies")?;
    info!(
        "Observed {} match-class and {} unmatch-class signatures",
        match_dist.len(),
        unmatch_dist.len()
    );

    let ranked = rank_signatures(&match_dist, &unmatch_dist);
    let labels = assign_labels(&ranked, params.mu, params.lambda)?;
    info!(
        "Ranked {} distinct signatures (mu={}, lambda={})",
        ranked.len(),
        params.mu,
        params.lambda
    );

    // Cross-product labeling. Each A-row's comparisons are independent of
    // every other A-row, so the outer loop fans out across rayon workers;
    // collecting per-row results keeps the output in dataset order.
    let rows_a: Vec<(&RecordKey, &Record)> = dataset_a.iter().collect();
    let rows_b: Vec<(&RecordKey, &Record)> = dataset_b.iter().collect();
    let total_candidates = (rows_a.len() * rows_b.len()) as u64;

    let pb = ProgressBar::new(rows_a.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    pb.set_message(format!("Labeling {} candidate pairs...", total_candidates));

    let labeled: Vec<(Vec<(String, String, MatchLabel)>, usize)> = rows_a
        .par_iter()
        .map(|(key_a, record_a)| {
            let mut rows = Vec::new();
            let mut skipped = 0usize;
            for (key_b, record_b) in &rows_b {
                if let Some(city) = city_index {
                    if record_a.fields[city] != record_b.fields[city] {
                        skipped += 1;
                        continue;
                    }
                }
                let signature = signature_of_records(record_a, record_b)?;
                let label = labels
                    .get(&signature)
                    .copied()
                    .unwrap_or(MatchLabel::Possible);
                rows.push((key_a.0.clone(), key_b.0.clone(), label));
            }
            pb.inc(1);
            Ok((rows, skipped))
        })
        .collect::<Result<Vec<_>, LinkageError>>()?;
    pb.finish_and_clear();

    let mut stats = LinkageStats {
        distinct_signatures: ranked.len(),
        ..Default::default()
    };
    let mut writer = csv::Writer::from_writer(output);
    for (rows, skipped) in labeled {
        stats.skipped_city_mismatch += skipped;
        for (key_a, key_b, label) in rows {
            writer
                .write_record([key_a.as_str(), key_b.as_str(), label.as_str()])
                .context("Failed to write output row")?;
            stats.rows_written += 1;
            match label {
                MatchLabel::Match => stats.match_count += 1,
                MatchLabel::Unmatch => stats.unmatch_count += 1,
                MatchLabel::Possible => stats.possible_count += 1,
            }
        }
    }
    writer.flush().context("Failed to flush output")?;
    stats.processing_time = start_time.elapsed();

    info!("=== Linkage Summary ===");
    info!(
        "Candidate pairs: {} ({} skipped by city blocking)",
        total_candidates, stats.skipped_city_mismatch
    );
    info!("Rows written: {}", stats.rows_written);
    info!(
        "Labels: {} match, {} unmatch, {} possible match",
        stats.match_count, stats.unmatch_count, stats.possible_count
    );
    info!("Completed in {:.2?}", stats.processing_time);

    Ok(stats)
}

fn validate_schema(dataset_a: &Dataset, dataset_b: &Dataset) -> Result<(), LinkageError> {
    if dataset_a.field_count() != dataset_b.field_count() {
        return Err(LinkageError::SchemaMismatch {
            left: dataset_a.name().to_string(),
            left_fields: dataset_a.field_count(),
            right: dataset_b.name().to_string(),
            right_fields: dataset_b.field_count(),
        });
    }
    if dataset_a.columns() != dataset_b.columns() {
        // Comparison is positional; differing names are suspicious but legal.
        warn!(
            "Column names differ between '{}' ({:?}) and '{}' ({:?}); comparing positionally",
            dataset_a.name(),
            dataset_a.columns(),
            dataset_b.name(),
            dataset_b.columns()
        );
    }
    Ok(())
}

fn resolve_city_index(
    dataset_a: &Dataset,
    dataset_b: &Dataset,
    params: &LinkageParams,
) -> Result<Option<usize>, LinkageError> {
    if !params.block_on_city {
        return Ok(None);
    }
    for dataset in [dataset_a, dataset_b] {
        if dataset.column_index(&params.city_column).is_none() {
            return Err(LinkageError::MissingColumn {
                dataset: dataset.name().to_string(),
                column: params.city_column.clone(),
            });
        }
    }
    // Schema validation already guarantees equal field counts; the blocking
    // column must sit at the same position in both datasets.
    Ok(dataset_a.column_index(&params.city_column))
}
