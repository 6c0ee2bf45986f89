//! Formatted terminal output for the startup summary.
//!
//! We keep formatting code in one place so:
//! - the aggregation/decomposition code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::decompose::Decomposition;
use crate::domain::{DatasetStats, MonthlyAggregate};

/// Format the full run summary (dataset stats + monthly span + decomposition
/// diagnostics).
pub fn format_run_summary(
    stats: &DatasetStats,
    monthly: &[MonthlyAggregate],
    decomp: &Decomposition,
) -> String {
    let mut out = String::new();

    out.push_str("=== salesdash - Superstore Sales Dashboard ===\n");
    out.push_str(&format!(
        "Rows: read={} dropped={} used={}\n",
        stats.rows_read, stats.rows_dropped, stats.n_records
    ));
    out.push_str(&format!(
        "Dates: [{}, {}]\n",
        stats.date_min, stats.date_max
    ));
    out.push_str(&format!(
        "Totals: sales={:.2} profit={:.2}\n",
        stats.total_sales, stats.total_profit
    ));

    if let (Some(first), Some(last)) = (monthly.first(), monthly.last()) {
        out.push_str(&format!(
            "Monthly series: n={} | [{}, {}]\n",
            monthly.len(),
            first.date,
            last.date
        ));
    }

    out.push_str("\nDecomposition (additive, period=12):\n");
    out.push_str(&format!(
        "- trend/residual support: {} months (offset {})\n",
        decomp.trend.len(),
        decomp.offset
    ));
    out.push_str(&format!(
        "- seasonal peak-to-trough: {:.2}\n",
        decomp.seasonal_amplitude()
    ));
    out.push('\n');

    out
}

/// Format the top-products table.
pub fn format_top_products(rows: &[(String, f64)]) -> String {
    let mut out = String::new();

    out.push_str("Top products by sales:\n");
    out.push_str(&format!("{:<44} {:>14}\n", "product", "sales"));
    out.push_str(&format!("{:-<44} {:-<14}\n", "", ""));

    for (name, sales) in rows {
        out.push_str(&format!("{:<44} {:>14.2}\n", truncate(name, 44), sales));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::seasonal_decompose;
    use chrono::NaiveDate;

    #[test]
    fn summary_mentions_drop_count_and_support() {
        let stats = DatasetStats {
            rows_read: 100,
            rows_dropped: 3,
            n_records: 97,
            date_min: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            date_max: NaiveDate::from_ymd_opt(2017, 12, 31).unwrap(),
            total_sales: 5000.0,
            total_profit: 800.0,
        };

        let monthly: Vec<MonthlyAggregate> = (0..36)
            .map(|i| {
                let year = 2015 + i / 12;
                let month = (i % 12 + 1) as u32;
                MonthlyAggregate {
                    year,
                    month,
                    date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                    sales: 100.0 + i as f64,
                }
            })
            .collect();
        let values: Vec<f64> = monthly.iter().map(|m| m.sales).collect();
        let decomp = seasonal_decompose(&values, 12).unwrap();

        let summary = format_run_summary(&stats, &monthly, &decomp);
        assert!(summary.contains("dropped=3"));
        assert!(summary.contains("n=36"));
        assert!(summary.contains("support: 24 months (offset 6)"));
    }

    #[test]
    fn top_products_table_lists_all_rows() {
        let rows = vec![
            ("Canon imageCLASS 2200 Advanced Copier".to_string(), 61599.82),
            ("Fellowes PB500 Electric Punch".to_string(), 27453.38),
        ];
        let table = format_top_products(&rows);
        assert!(table.contains("Canon imageCLASS"));
        assert!(table.contains("61599.82"));
        assert_eq!(table.lines().count(), 5);
    }
}
