// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use linker_lib::config::DEFAULT_CITY_COLUMN;
use linker_lib::datasets::{load_pairs_path, Dataset};
use linker_lib::{link_datasets, LinkageParams};

/// Classify every candidate pair of records from two listings as match,
/// unmatch, or possible match, trained from labeled example pairs.
#[derive(Parser, Debug)]
#[command(name = "record_linker", version, about)]
struct Cli {
    /// First dataset CSV (header row; first column is the record key)
    #[arg(long, value_name = "PATH")]
    dataset_a: PathBuf,

    /// Second dataset CSV (same comparable columns as the first)
    #[arg(long, value_name = "PATH")]
    dataset_b: PathBuf,

    /// Headerless CSV of known matching key pairs (key_a,key_b)
    #[arg(long, value_name = "PATH")]
    known_matches: PathBuf,

    /// Headerless CSV of known non-matching key pairs (key_a,key_b)
    #[arg(long, value_name = "PATH")]
    known_unmatches: PathBuf,

    /// Output CSV path for (key_a,key_b,label) rows
    #[arg(long, short, value_name = "PATH")]
    output: PathBuf,

    /// Maximum tolerable false-positive rate, in [0, 1]
    #[arg(long)]
    mu: f64,

    /// Maximum tolerable false-negative rate, in [0, 1]
    #[arg(long)]
    lambda: f64,

    /// Only compare pairs whose city fields match exactly
    #[arg(long)]
    block_on_city: bool,

    /// Column consulted by --block-on-city
    #[arg(long, default_value = DEFAULT_CITY_COLUMN)]
    city_column: String,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let params = LinkageParams::new(cli.mu, cli.lambda, cli.block_on_city)?
        .with_city_column(cli.city_column);

    info!(
        "Starting record linkage (mu={}, lambda={}, block_on_city={})",
        params.mu, params.lambda, params.block_on_city
    );

    let dataset_a = Dataset::from_csv_path(stem_name(&cli.dataset_a), &cli.dataset_a)?;
    let dataset_b = Dataset::from_csv_path(stem_name(&cli.dataset_b), &cli.dataset_b)?;
    info!(
        "Loaded {} records from '{}' and {} records from '{}'",
        dataset_a.len(),
        dataset_a.name(),
        dataset_b.len(),
        dataset_b.name()
    );

    let known_matches = load_pairs_path(&cli.known_matches)?;
    let known_unmatches = load_pairs_path(&cli.known_unmatches)?;

    let output = File::create(&cli.output)
        .with_context(|| format!("Failed to create output file {}", cli.output.display()))?;
    let stats = link_datasets(
        &dataset_a,
        &dataset_b,
        &known_matches,
        &known_unmatches,
        &params,
        BufWriter::new(output),
    )?;

    info!(
        "Wrote {} rows to {}",
        stats.rows_written,
        cli.output.display()
    );
    Ok(())
}

fn stem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
