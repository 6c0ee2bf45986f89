//! Synthetic Superstore-style dataset generation.
//!
//! Generates a sales history with a known linear trend and a known sinusoidal
//! seasonal pattern (period 12), split into per-row transactions. Seeded and
//! reproducible, so the same flags always produce the same CSV. Used for
//! demos and for end-to-end verification of the decomposition.

use chrono::{Datelike, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::SalesRecord;
use crate::error::AppError;

const CATEGORIES: [(&str, &[&str]); 3] = [
    ("Furniture", &["Bookcases", "Chairs", "Tables", "Furnishings"]),
    ("Office Supplies", &["Binders", "Paper", "Storage", "Appliances"]),
    ("Technology", &["Phones", "Accessories", "Machines", "Copiers"]),
];

const REGIONS: [&str; 4] = ["Central", "East", "South", "West"];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of months of history to generate.
    pub months: usize,
    /// Transactions per month.
    pub rows_per_month: usize,
    pub seed: u64,
    /// Monthly sales level at month 0.
    pub base: f64,
    /// Linear trend in sales per month.
    pub slope: f64,
    /// Seasonal sinusoid amplitude (peak above the trend line).
    pub amplitude: f64,
    /// Std dev of monthly gaussian noise (0 disables noise).
    pub noise: f64,
    /// First month of the history.
    pub start: NaiveDate,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            months: 36,
            rows_per_month: 40,
            seed: 42,
            base: 30_000.0,
            slope: 300.0,
            amplitude: 5_000.0,
            noise: 0.0,
            start: NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date"),
        }
    }
}

/// Generate synthetic records whose monthly sales follow
/// `base + slope*i + amplitude*sin(2*pi*i/12) + noise`.
///
/// The per-month transaction split conserves the monthly total exactly, so
/// aggregation recovers the injected series.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<SalesRecord>, AppError> {
    if config.months == 0 || config.rows_per_month == 0 {
        return Err(AppError::internal(
            "Sample months and rows-per-month must be > 0.",
        ));
    }
    if !(config.base.is_finite()
        && config.slope.is_finite()
        && config.amplitude.is_finite()
        && config.noise.is_finite()
        && config.noise >= 0.0)
    {
        return Err(AppError::internal("Invalid sample shape parameters."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::internal(format!("Noise distribution error: {e}")))?;

    let mut records = Vec::with_capacity(config.months * config.rows_per_month);

    for i in 0..config.months {
        let phase = 2.0 * std::f64::consts::PI * (i % 12) as f64 / 12.0;
        let mut target = config.base
            + config.slope * i as f64
            + config.amplitude * phase.sin();
        if config.noise > 0.0 {
            target += config.noise * normal.sample(&mut rng);
        }
        // Keep monthly totals positive even for aggressive noise settings.
        let target = target.max(1.0);

        let month_start = add_months(config.start, i);

        // Random positive weights, normalized so row sales sum to the target.
        let weights: Vec<f64> = (0..config.rows_per_month)
            .map(|_| rng.gen_range(0.5..1.5))
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        for (j, w) in weights.iter().enumerate() {
            let sales = target * w / weight_sum;
            let (category, sub_categories) = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let sub_category = sub_categories[rng.gen_range(0..sub_categories.len())];
            let region = REGIONS[rng.gen_range(0..REGIONS.len())];
            let day = rng.gen_range(1..=28);
            let order_date = month_start
                .with_day(day)
                .ok_or_else(|| AppError::internal("Invalid sample day."))?;
            let margin = rng.gen_range(-0.1..0.4);

            records.push(SalesRecord {
                order_date,
                year: order_date.year(),
                month: order_date.month(),
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                region: region.to_string(),
                product_name: format!("{sub_category} Model {:02}", j % 20),
                sales,
                profit: sales * margin,
                quantity: rng.gen_range(1..=14),
            });
        }
    }

    Ok(records)
}

/// Write records as a CSV compatible with `io::ingest`.
pub fn write_sample_csv(path: &std::path::Path, records: &[SalesRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::data_load(format!("Failed to create '{}': {e}", path.display())))?;

    writer
        .write_record([
            "Order Date",
            "Category",
            "Sub-Category",
            "Region",
            "Product Name",
            "Sales",
            "Profit",
            "Quantity",
        ])
        .map_err(|e| AppError::data_load(format!("CSV write error: {e}")))?;

    for r in records {
        writer
            .write_record([
                r.order_date.format("%m/%d/%Y").to_string(),
                r.category.clone(),
                r.sub_category.clone(),
                r.region.clone(),
                r.product_name.clone(),
                format!("{:.4}", r.sales),
                format!("{:.4}", r.profit),
                r.quantity.to_string(),
            ])
            .map_err(|e| AppError::data_load(format!("CSV write error: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::data_load(format!("CSV write error: {e}")))?;
    Ok(())
}

fn add_months(start: NaiveDate, months: usize) -> NaiveDate {
    let zero_based = start.month0() as usize + months;
    let year = start.year() + (zero_based / 12) as i32;
    let month = (zero_based % 12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
}
