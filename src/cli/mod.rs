//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/decomposition code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salesdash", version, about = "Superstore sales dashboard (CSV -> charts -> local HTTP)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the CSV, build all charts, and serve the dashboard page.
    Serve(ServeArgs),
    /// Run the same pipeline but only print the terminal summary (no server).
    Report(ServeArgs),
    /// Generate a synthetic Superstore-style CSV with a known trend/seasonal shape.
    Sample(SampleArgs),
}

/// Common options for serving and reporting.
#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Path to the sales CSV (falls back to $SALESDASH_CSV, then `superstore.csv`).
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(short = 'p', long, default_value_t = 8050)]
    pub port: u16,

    /// Seasonal period in months.
    #[arg(long, default_value_t = 12)]
    pub period: usize,

    /// How many products the top-products chart shows.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Bin count for the order-quantity histogram.
    #[arg(long, default_value_t = 30)]
    pub bins: usize,

    /// Verbose logging (debug-level traces, including per-request logs).
    #[arg(long)]
    pub debug: bool,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, default_value = "superstore.csv")]
    pub out: PathBuf,

    /// Months of history to generate.
    #[arg(long, default_value_t = 36)]
    pub months: usize,

    /// Transactions per month.
    #[arg(long, default_value_t = 40)]
    pub rows_per_month: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Monthly sales level at month 0.
    #[arg(long, default_value_t = 30_000.0)]
    pub base: f64,

    /// Linear trend in sales per month.
    #[arg(long, default_value_t = 300.0)]
    pub slope: f64,

    /// Seasonal sinusoid amplitude.
    #[arg(long, default_value_t = 5_000.0)]
    pub amplitude: f64,

    /// Std dev of monthly gaussian noise (0 disables noise).
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,
}
