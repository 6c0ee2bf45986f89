//! The fixed set of dashboard figures.
//!
//! Every builder is a pure function from the cleaned records (or an aggregate
//! derived from them) to a plotly figure JSON value. The `build_charts` order
//! is the page order and is fixed at build time.

use serde_json::{Value, json};

use crate::agg::{self, RegionCategoryMatrix};
use crate::charts::ChartSpec;
use crate::charts::palette;
use crate::decompose::Decomposition;
use crate::domain::{DashConfig, MonthlyAggregate, SalesRecord};
use crate::error::AppError;

/// Build all twelve charts in page order.
pub fn build_charts(
    records: &[SalesRecord],
    monthly: &[MonthlyAggregate],
    decomp: &Decomposition,
    config: &DashConfig,
) -> Result<Vec<ChartSpec>, AppError> {
    let heatmap = agg::sales_by_region_category(records);

    let charts = vec![
        sales_by_category(records),
        profit_by_region(records),
        sales_trend(records),
        sales_by_subcategory(records),
        profit_vs_sales(records),
        top_products(records, config.top_n),
        quantity_distribution(records, config.hist_bins),
        sales_heatmap(&heatmap),
        monthly_sales_trend(records),
        trend_component(monthly, decomp)?,
        seasonality_component(monthly, decomp),
        residual_component(monthly, decomp)?,
    ];

    Ok(charts)
}

fn sales_by_category(records: &[SalesRecord]) -> ChartSpec {
    let sums = agg::sales_by_category(records);
    let data: Vec<Value> = sums
        .iter()
        .enumerate()
        .map(|(i, (name, total))| bar_trace(name, *total, palette::pick(palette::SET3, i)))
        .collect();

    ChartSpec {
        id: "sales-by-category",
        title: "Sales by Category",
        figure: json!({
            "data": data,
            "layout": base_layout("Sales by Category", "Category", "Sales"),
        }),
    }
}

fn profit_by_region(records: &[SalesRecord]) -> ChartSpec {
    let sums = agg::profit_by_region(records);
    let data: Vec<Value> = sums
        .iter()
        .enumerate()
        .map(|(i, (name, total))| bar_trace(name, *total, palette::pick(palette::PASTEL, i)))
        .collect();

    ChartSpec {
        id: "profit-by-region",
        title: "Profit by Region",
        figure: json!({
            "data": data,
            "layout": base_layout("Profit by Region", "Region", "Profit"),
        }),
    }
}

fn sales_trend(records: &[SalesRecord]) -> ChartSpec {
    let yearly = agg::sales_by_year(records);
    let years: Vec<i32> = yearly.iter().map(|(y, _)| *y).collect();
    let sales: Vec<f64> = yearly.iter().map(|(_, s)| *s).collect();

    ChartSpec {
        id: "sales-trend",
        title: "Sales Trend Over Years",
        figure: json!({
            "data": [{
                "type": "scatter",
                "mode": "lines+markers",
                "x": years,
                "y": sales,
                "line": { "shape": "linear" },
            }],
            "layout": dark_layout("Sales Trend Over Years", "Year", "Sales"),
        }),
    }
}

fn sales_by_subcategory(records: &[SalesRecord]) -> ChartSpec {
    let sums = agg::sales_by_subcategory(records);
    let data: Vec<Value> = sums
        .iter()
        .enumerate()
        .map(|(i, (name, total))| bar_trace(name, *total, palette::pick(palette::PLASMA, i)))
        .collect();

    ChartSpec {
        id: "sales-by-subcategory",
        title: "Sales by Sub-Category",
        figure: json!({
            "data": data,
            "layout": base_layout("Sales by Sub-Category", "Sub-Category", "Sales"),
        }),
    }
}

fn profit_vs_sales(records: &[SalesRecord]) -> ChartSpec {
    // One trace per category so plotly renders a category legend.
    let mut categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    // Marker area scales with quantity; sizeref follows the usual plotly
    // convention for a max marker size of ~20px.
    let max_quantity = records.iter().map(|r| r.quantity).max().unwrap_or(1).max(1);
    let sizeref = 2.0 * max_quantity as f64 / 400.0;

    let data: Vec<Value> = categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let subset: Vec<&SalesRecord> =
                records.iter().filter(|r| r.category == *cat).collect();
            let x: Vec<f64> = subset.iter().map(|r| r.sales).collect();
            let y: Vec<f64> = subset.iter().map(|r| r.profit).collect();
            let sizes: Vec<u32> = subset.iter().map(|r| r.quantity).collect();
            let names: Vec<&str> = subset.iter().map(|r| r.product_name.as_str()).collect();

            json!({
                "type": "scatter",
                "mode": "markers",
                "name": cat,
                "x": x,
                "y": y,
                "text": names,
                "marker": {
                    "color": palette::pick(palette::SET1, i),
                    "size": sizes,
                    "sizemode": "area",
                    "sizeref": sizeref,
                    "sizemin": 3,
                },
                "hovertemplate": "%{text}<br>Sales: %{x:.2f}<br>Profit: %{y:.2f}<extra></extra>",
            })
        })
        .collect();

    ChartSpec {
        id: "profit-vs-sales",
        title: "Profit vs. Sales",
        figure: json!({
            "data": data,
            "layout": base_layout("Profit vs. Sales", "Sales", "Profit"),
        }),
    }
}

fn top_products(records: &[SalesRecord], n: usize) -> ChartSpec {
    let top = agg::top_products(records, n);
    let data: Vec<Value> = top
        .iter()
        .enumerate()
        .map(|(i, (name, total))| bar_trace(name, *total, palette::pick(palette::VIVID, i)))
        .collect();

    ChartSpec {
        id: "top-products",
        title: "Top 10 Products by Sales",
        figure: json!({
            "data": data,
            "layout": base_layout("Top 10 Products by Sales", "Product Name", "Sales"),
        }),
    }
}

fn quantity_distribution(records: &[SalesRecord], bins: usize) -> ChartSpec {
    let quantities: Vec<u32> = records.iter().map(|r| r.quantity).collect();

    ChartSpec {
        id: "order-quantity-dist",
        title: "Order Quantity Distribution",
        figure: json!({
            "data": [{
                "type": "histogram",
                "x": quantities,
                "nbinsx": bins,
                "marker": { "color": palette::pick(palette::G10, 0) },
            }],
            "layout": base_layout("Order Quantity Distribution", "Quantity", "Count"),
        }),
    }
}

fn sales_heatmap(matrix: &RegionCategoryMatrix) -> ChartSpec {
    ChartSpec {
        id: "sales-heatmap",
        title: "Sales Heatmap by Region and Category",
        figure: json!({
            "data": [{
                "type": "heatmap",
                "x": &matrix.regions,
                "y": &matrix.categories,
                "z": &matrix.z,
                "colorscale": "Viridis",
            }],
            "layout": base_layout("Sales Heatmap by Region and Category", "Region", "Category"),
        }),
    }
}

fn monthly_sales_trend(records: &[SalesRecord]) -> ChartSpec {
    let by_year = agg::monthly_by_year(records);
    let data: Vec<Value> = by_year
        .iter()
        .map(|(year, points)| {
            let months: Vec<u32> = points.iter().map(|(m, _)| *m).collect();
            let sales: Vec<f64> = points.iter().map(|(_, s)| *s).collect();
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": year.to_string(),
                "x": months,
                "y": sales,
                "line": { "shape": "spline" },
            })
        })
        .collect();

    ChartSpec {
        id: "monthly-sales-trend",
        title: "Sales Trend by Month",
        figure: json!({
            "data": data,
            "layout": dark_layout("Sales Trend by Month", "Month", "Sales"),
        }),
    }
}

fn trend_component(monthly: &[MonthlyAggregate], decomp: &Decomposition) -> Result<ChartSpec, AppError> {
    let dates = support_dates(monthly, decomp.offset, decomp.trend.len())?;
    Ok(component_chart(
        "trend-component",
        "Trend Component",
        "Trend",
        dates,
        &decomp.trend,
        "royalblue",
    ))
}

fn seasonality_component(monthly: &[MonthlyAggregate], decomp: &Decomposition) -> ChartSpec {
    // Seasonal is cyclic and defined for every month in the index.
    let dates: Vec<String> = monthly.iter().map(|m| m.date.to_string()).collect();
    component_chart(
        "seasonality-component",
        "Seasonal Component",
        "Seasonality",
        dates,
        &decomp.seasonal,
        "green",
    )
}

fn residual_component(monthly: &[MonthlyAggregate], decomp: &Decomposition) -> Result<ChartSpec, AppError> {
    let dates = support_dates(monthly, decomp.offset, decomp.residual.len())?;
    Ok(component_chart(
        "residual-component",
        "Residual Component",
        "Residuals",
        dates,
        &decomp.residual,
        "red",
    ))
}

/// Dates for the trend/residual support window.
///
/// The components of a centered filter belong to the middle of the index, so
/// they are aligned at `offset`, not flush against the end of the series.
fn support_dates(
    monthly: &[MonthlyAggregate],
    offset: usize,
    len: usize,
) -> Result<Vec<String>, AppError> {
    let end = offset + len;
    if end > monthly.len() {
        return Err(AppError::internal(
            "Decomposition support exceeds the monthly index.",
        ));
    }
    Ok(monthly[offset..end].iter().map(|m| m.date.to_string()).collect())
}

fn component_chart(
    id: &'static str,
    title: &'static str,
    series_name: &str,
    dates: Vec<String>,
    values: &[f64],
    color: &str,
) -> ChartSpec {
    ChartSpec {
        id,
        title,
        figure: json!({
            "data": [{
                "type": "scatter",
                "mode": "lines",
                "name": series_name,
                "x": dates,
                "y": values,
                "line": { "color": color, "width": 4 },
            }],
            "layout": dark_layout(title, "Date", "Sales"),
        }),
    }
}

fn bar_trace(name: &str, total: f64, color: &'static str) -> Value {
    json!({
        "type": "bar",
        "name": name,
        "x": [name],
        "y": [total],
        "marker": { "color": color },
    })
}

fn base_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title } },
        "yaxis": { "title": { "text": y_title } },
        "showlegend": true,
    })
}

/// Dark-template layout used by the time-series charts.
fn dark_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title }, "gridcolor": "#283442" },
        "yaxis": { "title": { "text": y_title }, "gridcolor": "#283442" },
        "paper_bgcolor": "#111111",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "font": { "color": "#f2f5fa" },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::seasonal_decompose;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn test_config() -> DashConfig {
        DashConfig {
            csv_path: "superstore.csv".into(),
            host: "127.0.0.1".to_string(),
            port: 8050,
            period: 12,
            top_n: 10,
            hist_bins: 30,
            debug: false,
        }
    }

    fn fixture_records() -> Vec<SalesRecord> {
        let mut out = Vec::new();
        for m in 0..36u32 {
            let year = 2015 + (m / 12) as i32;
            let month = m % 12 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
            out.push(SalesRecord {
                order_date: date,
                year,
                month,
                category: if m % 2 == 0 { "Furniture" } else { "Technology" }.to_string(),
                sub_category: "Chairs".to_string(),
                region: if m % 3 == 0 { "West" } else { "East" }.to_string(),
                product_name: format!("Product-{:02}", m % 14),
                sales: 1000.0 + 10.0 * m as f64,
                profit: 100.0 + m as f64,
                quantity: m % 9 + 1,
            });
        }
        out
    }

    fn fixture_inputs() -> (Vec<SalesRecord>, Vec<MonthlyAggregate>, Decomposition) {
        let records = fixture_records();
        let monthly = agg::monthly_sales(&records).unwrap();
        let values: Vec<f64> = monthly.iter().map(|m| m.sales).collect();
        let decomp = seasonal_decompose(&values, 12).unwrap();
        (records, monthly, decomp)
    }

    #[test]
    fn builds_twelve_charts_with_unique_ids() {
        let (records, monthly, decomp) = fixture_inputs();
        let charts = build_charts(&records, &monthly, &decomp, &test_config()).unwrap();

        assert_eq!(charts.len(), 12);
        let ids: HashSet<&str> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 12);

        for c in &charts {
            let data = c.figure.get("data").and_then(Value::as_array).unwrap();
            assert!(!data.is_empty(), "chart {} has no traces", c.id);
            assert!(c.figure.get("layout").is_some());
        }
    }

    #[test]
    fn component_charts_align_to_support_offset() {
        let (records, monthly, decomp) = fixture_inputs();
        let charts = build_charts(&records, &monthly, &decomp, &test_config()).unwrap();

        let trend = charts.iter().find(|c| c.id == "trend-component").unwrap();
        let xs = trend.figure["data"][0]["x"].as_array().unwrap();
        // First trend point belongs to month `offset`, not the series tail.
        assert_eq!(xs.len(), decomp.trend.len());
        assert_eq!(
            xs[0].as_str().unwrap(),
            monthly[decomp.offset].date.to_string()
        );

        let seasonal = charts.iter().find(|c| c.id == "seasonality-component").unwrap();
        let xs = seasonal.figure["data"][0]["x"].as_array().unwrap();
        assert_eq!(xs.len(), monthly.len());
    }

    #[test]
    fn top_products_chart_has_at_most_ten_bars() {
        let (records, monthly, decomp) = fixture_inputs();
        let charts = build_charts(&records, &monthly, &decomp, &test_config()).unwrap();
        let top = charts.iter().find(|c| c.id == "top-products").unwrap();
        let data = top.figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 10);
    }
}
