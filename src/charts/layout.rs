//! Static HTML page assembly.
//!
//! The page is rendered once at startup: a header, then rows of two chart
//! divs, then one `Plotly.newPlot` call per chart. Chart order is the
//! `build_charts` order; placement is fixed at build time.

use crate::charts::ChartSpec;
use crate::error::AppError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Render the full dashboard page.
pub fn render_page(title: &str, charts: &[ChartSpec]) -> Result<String, AppError> {
    let mut body = String::new();

    for row in charts.chunks(2) {
        body.push_str("    <div class=\"chart-row\">\n");
        for chart in row {
            body.push_str(&format!(
                "      <div class=\"chart-cell\"><div id=\"{}\"></div></div>\n",
                chart.id
            ));
        }
        body.push_str("    </div>\n");
    }

    let mut script = String::new();
    for chart in charts {
        let figure = serde_json::to_string(&chart.figure)
            .map_err(|e| AppError::internal(format!("Failed to serialize figure '{}': {e}", chart.id)))?;
        // Escape `</` so a string inside the figure can never terminate the
        // surrounding <script> element.
        let figure = figure.replace("</", "<\\/");
        script.push_str(&format!(
            "      (function() {{ var fig = {figure}; Plotly.newPlot(\"{}\", fig.data, fig.layout, {{responsive: true}}); }})();\n",
            chart.id
        ));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{PLOTLY_CDN}"></script>
    <style>
      body {{ background-color: #1a1a1a; padding: 20px; margin: 0; }}
      h1 {{ text-align: center; color: white; font-family: Arial, sans-serif; font-size: 36px; }}
      .chart-row {{ display: flex; flex-wrap: wrap; gap: 20px; justify-content: center; }}
      .chart-cell {{ width: 48%; min-width: 480px; background-color: #ffffff; border-radius: 4px; margin-bottom: 20px; }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
{body}    <script>
{script}    </script>
  </body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart(id: &'static str) -> ChartSpec {
        ChartSpec {
            id,
            title: "T",
            figure: json!({ "data": [{ "type": "bar", "x": ["a"], "y": [1.0] }], "layout": {} }),
        }
    }

    #[test]
    fn page_embeds_one_div_and_plot_call_per_chart() {
        let charts = vec![chart("a-chart"), chart("b-chart"), chart("c-chart")];
        let html = render_page("Dashboard", &charts).unwrap();

        for c in &charts {
            assert!(html.contains(&format!("id=\"{}\"", c.id)));
            assert!(html.contains(&format!("Plotly.newPlot(\"{}\"", c.id)));
        }
        // Two charts per row, last row has the odd one out.
        assert_eq!(html.matches("chart-row").count(), 2 + 1); // 2 rows + css rule
    }

    #[test]
    fn script_close_tags_are_escaped() {
        let tricky = ChartSpec {
            id: "x",
            title: "T",
            figure: json!({ "data": [{ "text": ["</script>"] }], "layout": {} }),
        };
        let html = render_page("Dashboard", &[tricky]).unwrap();
        assert!(!html.contains("</script><br>"));
        assert!(html.contains("<\\/script>"));
    }
}
