//! Grouping and summing over the cleaned record set.
//!
//! Every function here is a pure fold over `&[SalesRecord]` keyed through a
//! `BTreeMap`, so outputs are deterministic and already sorted by key. The
//! monthly series in particular MUST be chronologically sorted before it is
//! handed to the decomposition (which assumes a regular, ordered monthly
//! index).
//!
//! Known limitation: calendar gaps are not detected. A month with zero
//! transactions simply does not appear, and the decomposition will treat the
//! surrounding rows as one month apart.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{MonthlyAggregate, SalesRecord};
use crate::error::AppError;

/// Summed sales per (year, month), sorted chronologically.
///
/// The synthesized `date` is the first day of the month.
pub fn monthly_sales(records: &[SalesRecord]) -> Result<Vec<MonthlyAggregate>, AppError> {
    let mut groups: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in records {
        *groups.entry((r.year, r.month)).or_insert(0.0) += r.sales;
    }

    let mut out = Vec::with_capacity(groups.len());
    for ((year, month), sales) in groups {
        let date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::internal(format!("Invalid month key {year}-{month}.")))?;
        out.push(MonthlyAggregate {
            year,
            month,
            date,
            sales,
        });
    }
    Ok(out)
}

/// Summed sales per category, sorted by category name.
pub fn sales_by_category(records: &[SalesRecord]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.category.clone(), |r| r.sales)
}

/// Summed profit per region, sorted by region name.
pub fn profit_by_region(records: &[SalesRecord]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.region.clone(), |r| r.profit)
}

/// Summed sales per sub-category, sorted by sub-category name.
pub fn sales_by_subcategory(records: &[SalesRecord]) -> Vec<(String, f64)> {
    sum_by(records, |r| r.sub_category.clone(), |r| r.sales)
}

/// Summed sales per year, ascending.
pub fn sales_by_year(records: &[SalesRecord]) -> Vec<(i32, f64)> {
    let mut groups: BTreeMap<i32, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(r.year).or_insert(0.0) += r.sales;
    }
    groups.into_iter().collect()
}

/// Top-N products by summed sales, descending.
///
/// Ties are broken by product name so the ordering is fully deterministic.
/// Returns fewer than `n` rows when fewer distinct products exist.
pub fn top_products(records: &[SalesRecord], n: usize) -> Vec<(String, f64)> {
    let mut sums = sum_by(records, |r| r.product_name.clone(), |r| r.sales);
    sums.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    sums.truncate(n);
    sums
}

/// Region x category sales matrix for the heatmap.
///
/// `z[i][j]` is the summed sales for `categories[i]` in `regions[j]`;
/// missing combinations are zero.
#[derive(Debug, Clone)]
pub struct RegionCategoryMatrix {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    pub z: Vec<Vec<f64>>,
}

pub fn sales_by_region_category(records: &[SalesRecord]) -> RegionCategoryMatrix {
    let mut cells: BTreeMap<(String, String), f64> = BTreeMap::new();
    let mut regions: BTreeMap<String, ()> = BTreeMap::new();
    let mut categories: BTreeMap<String, ()> = BTreeMap::new();

    for r in records {
        *cells
            .entry((r.category.clone(), r.region.clone()))
            .or_insert(0.0) += r.sales;
        regions.entry(r.region.clone()).or_insert(());
        categories.entry(r.category.clone()).or_insert(());
    }

    let regions: Vec<String> = regions.into_keys().collect();
    let categories: Vec<String> = categories.into_keys().collect();

    let z = categories
        .iter()
        .map(|c| {
            regions
                .iter()
                .map(|g| cells.get(&(c.clone(), g.clone())).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    RegionCategoryMatrix {
        regions,
        categories,
        z,
    }
}

/// Per-year monthly sales, for the one-line-per-year seasonal overlay chart.
///
/// Each entry is `(year, points)` where `points` holds the months present in
/// that year (ascending) and their summed sales.
pub fn monthly_by_year(records: &[SalesRecord]) -> Vec<(i32, Vec<(u32, f64)>)> {
    let mut groups: BTreeMap<i32, BTreeMap<u32, f64>> = BTreeMap::new();
    for r in records {
        *groups
            .entry(r.year)
            .or_default()
            .entry(r.month)
            .or_insert(0.0) += r.sales;
    }
    groups
        .into_iter()
        .map(|(year, months)| (year, months.into_iter().collect()))
        .collect()
}

fn sum_by(
    records: &[SalesRecord],
    key: impl Fn(&SalesRecord) -> String,
    value: impl Fn(&SalesRecord) -> f64,
) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(key(r)).or_insert(0.0) += value(r);
    }
    groups.into_iter().collect()
}
