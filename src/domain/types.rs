//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during aggregation and decomposition
//! - embedded into plotly figure JSON
//! - printed in terminal reports

use std::path::PathBuf;

use chrono::NaiveDate;

/// One cleaned sales transaction.
///
/// Rows with any missing or unparseable field are dropped entirely during
/// ingest, so every field here is always present. `year` and `month` are
/// derived from `order_date` once at load time.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub sub_category: String,
    pub region: String,
    pub product_name: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: u32,
}

/// Summed sales for one (year, month) group.
///
/// `date` is synthesized as the first day of the month so the monthly series
/// has a proper calendar axis for plotting and decomposition.
#[derive(Debug, Clone)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub date: NaiveDate,
    pub sales: f64,
}

/// Summary stats about the cleaned dataset.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub n_records: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub total_sales: f64,
    pub total_profit: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and env fallbacks).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub csv_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Observations per seasonal cycle (12 for monthly data, annual cycle).
    pub period: usize,
    /// How many products the top-products chart/table shows.
    pub top_n: usize,
    /// Bin count for the order-quantity histogram.
    pub hist_bins: usize,
    pub debug: bool,
}

impl DashConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
