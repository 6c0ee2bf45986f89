//! Chart construction and page assembly.
//!
//! Each chart is an independent `(data, layout)` plotly figure built as JSON;
//! the page embeds all of them into a static HTML tree in a fixed order.
//! There is no reactive update mechanism: plotly's default pan/zoom/hover is
//! the only interactivity.

pub mod figures;
pub mod layout;
pub mod palette;

use serde_json::Value;

/// A single chart: stable DOM id, human title, plotly figure JSON.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub figure: Value,
}

pub use figures::build_charts;
pub use layout::render_page;
