//! CSV ingest and cleaning.
//!
//! This module is responsible for turning a raw Superstore-style CSV into a
//! clean set of `SalesRecord`s that are safe to aggregate and decompose.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level cleaning**: a row with ANY missing or unparseable field is
//!   dropped entirely and reported (mirrors the whole-row drop policy of the
//!   upstream data-prep; callers must be aware sparse categories may vanish)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;

use crate::domain::{DashConfig, DatasetStats, SalesRecord};
use crate::error::AppError;

/// Columns the ingest refuses to run without (normalized names).
const REQUIRED_COLUMNS: [&str; 8] = [
    "order date",
    "category",
    "sub-category",
    "region",
    "product name",
    "sales",
    "profit",
    "quantity",
];

/// A row-level error encountered during ingest.
///
/// These rows are dropped, not recovered; we keep the reasons so the startup
/// summary can say how much data was silently lost to cleaning.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: cleaned records + dataset stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<SalesRecord>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
}

/// Load and clean the sales CSV into `SalesRecord`s.
pub fn load_records(config: &DashConfig) -> Result<IngestedData, AppError> {
    let bytes = std::fs::read(&config.csv_path).map_err(|e| {
        AppError::data_load(format!(
            "Failed to open CSV '{}': {e}",
            config.csv_path.display()
        ))
    })?;

    // Superstore exports are usually latin-1; windows-1252 decodes every byte
    // sequence, so this cannot fail, only substitute.
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::data_load(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(rec) => records.push(rec),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if records.is_empty() {
        return Err(AppError::data_load(
            "No valid rows remain after cleaning.",
        ));
    }

    let stats = compute_stats(rows_read, row_errors.len(), &records)
        .ok_or_else(|| AppError::internal("Non-finite totals in cleaned data."))?;

    Ok(IngestedData {
        records,
        stats,
        row_errors,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit CSVs with a BOM prefix on the
    // first header (e.g. "﻿Order ID"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for column in REQUIRED_COLUMNS {
        if !header_map.contains_key(column) {
            return Err(AppError::schema_mismatch(format!(
                "Missing required column: `{column}`"
            )));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    let order_date = parse_date(get_required(record, header_map, "order date")?)?;

    let category = get_required(record, header_map, "category")?.to_string();
    let sub_category = get_required(record, header_map, "sub-category")?.to_string();
    let region = get_required(record, header_map, "region")?.to_string();
    let product_name = get_required(record, header_map, "product name")?.to_string();

    let sales = parse_f64(get_required(record, header_map, "sales")?, "sales")?;
    let profit = parse_f64(get_required(record, header_map, "profit")?, "profit")?;
    let quantity = parse_quantity(get_required(record, header_map, "quantity")?)?;

    Ok(SalesRecord {
        order_date,
        year: order_date.year(),
        month: order_date.month(),
        category,
        sub_category,
        region,
        product_name,
        sales,
        profit,
        quantity,
    })
}

fn compute_stats(rows_read: usize, rows_dropped: usize, records: &[SalesRecord]) -> Option<DatasetStats> {
    let mut date_min = NaiveDate::MAX;
    let mut date_max = NaiveDate::MIN;
    let mut total_sales = 0.0;
    let mut total_profit = 0.0;

    for r in records {
        date_min = date_min.min(r.order_date);
        date_max = date_max.max(r.order_date);
        total_sales += r.sales;
        total_profit += r.profit;
    }

    if !total_sales.is_finite() || !total_profit.is_finite() {
        return None;
    }

    Some(DatasetStats {
        rows_read,
        rows_dropped,
        n_records: records.len(),
        date_min,
        date_max,
        total_sales,
        total_profit,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Superstore exports commonly use `MM/DD/YYYY`; we also accept ISO and
    // two day-first variants to reduce friction while keeping parsing
    // deterministic. Formats are tried in a fixed order, so an ambiguous
    // slash date like `11/08/2016` always resolves month-first.
    const FMTS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: MM/DD/YYYY, YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY."
    ))
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value '{s}'."));
    }
    Ok(v)
}

fn parse_quantity(s: &str) -> Result<u32, String> {
    // Some exports store quantity as "3.0"; accept integral floats.
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `quantity` value '{s}'."))?;
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(format!("Invalid `quantity` value '{s}'."));
    }
    Ok(v as u32)
}
