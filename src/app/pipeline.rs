//! Shared build pipeline used by both `serve` and `report`.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> monthly aggregation -> seasonal decomposition -> charts -> page
//!
//! The front-ends then focus on presentation (serving vs printing).

use tracing::{info, warn};

use crate::charts::ChartSpec;
use crate::decompose::Decomposition;
use crate::domain::{DashConfig, MonthlyAggregate};
use crate::error::AppError;
use crate::io::ingest::IngestedData;

const PAGE_TITLE: &str = "Superstore Sales Dashboard";

/// All computed outputs of a single build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub ingest: IngestedData,
    pub monthly: Vec<MonthlyAggregate>,
    pub decomposition: Decomposition,
    pub charts: Vec<ChartSpec>,
    pub page: String,
}

/// Execute the full build pipeline and return the computed outputs.
///
/// Fail-fast: any error here aborts before the server starts.
pub fn run_build(config: &DashConfig) -> Result<BuildOutput, AppError> {
    // 1) Ingest and clean.
    let ingest = crate::io::ingest::load_records(config)?;
    if ingest.stats.rows_dropped > 0 {
        warn!(
            dropped = ingest.stats.rows_dropped,
            read = ingest.stats.rows_read,
            "dropped rows with missing fields"
        );
    }

    // 2) Monthly aggregation (sorted chronologically by construction).
    let monthly = crate::agg::monthly_sales(&ingest.records)?;
    let values: Vec<f64> = monthly.iter().map(|m| m.sales).collect();

    // 3) Seasonal decomposition over the monthly series.
    let decomposition = crate::decompose::seasonal_decompose(&values, config.period)?;
    info!(
        months = monthly.len(),
        support = decomposition.trend.len(),
        "decomposed monthly sales series"
    );

    // 4) Charts and static page.
    let charts = crate::charts::build_charts(&ingest.records, &monthly, &decomposition, config)?;
    let page = crate::charts::render_page(PAGE_TITLE, &charts)?;

    Ok(BuildOutput {
        ingest,
        monthly,
        decomposition,
        charts,
        page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SampleConfig, generate_sample, write_sample_csv};

    #[test]
    fn full_pipeline_builds_page_from_sample_csv() {
        let sample = SampleConfig {
            months: 36,
            rows_per_month: 6,
            ..SampleConfig::default()
        };
        let records = generate_sample(&sample).unwrap();
        let path = std::env::temp_dir().join("sales-dash-test-pipeline.csv");
        write_sample_csv(&path, &records).unwrap();

        let config = DashConfig {
            csv_path: path,
            host: "127.0.0.1".to_string(),
            port: 8050,
            period: 12,
            top_n: 10,
            hist_bins: 30,
            debug: false,
        };

        let build = run_build(&config).unwrap();
        assert_eq!(build.monthly.len(), 36);
        assert_eq!(build.charts.len(), 12);
        assert!(build.page.contains("Superstore Sales Dashboard"));
        assert!(build.page.contains("Plotly.newPlot(\"sales-by-category\""));

        // Conservation law: aggregates add up to the cleaned sales column.
        let agg_total: f64 = build.monthly.iter().map(|m| m.sales).sum();
        assert!((agg_total - build.ingest.stats.total_sales).abs() < 1e-6);
    }

    #[test]
    fn short_history_fails_before_serving() {
        let sample = SampleConfig {
            months: 18,
            rows_per_month: 3,
            ..SampleConfig::default()
        };
        let records = generate_sample(&sample).unwrap();
        let path = std::env::temp_dir().join("sales-dash-test-short.csv");
        write_sample_csv(&path, &records).unwrap();

        let config = DashConfig {
            csv_path: path,
            host: "127.0.0.1".to_string(),
            port: 8050,
            period: 12,
            top_n: 10,
            hist_bins: 30,
            debug: false,
        };

        let err = run_build(&config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InsufficientHistory);
    }
}
