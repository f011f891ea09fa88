//! # decomchart-viz
//!
//! Stacked-area chart generation for decomchart.
//!
//! This crate turns a [`RetirementOutlook`] into a chart specification that
//! can be rendered by:
//! - HTML/Chart.js output (side-by-side stacked-area panels)
//! - Any consumer of the JSON spec

mod palette;
mod summary;

pub use palette::assign_colors;
pub use summary::{format_gw, summary};

use decomchart_pipeline::{FuelCategory, RetirementOutlook};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while emitting chart output.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single stacked-area chart panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    /// Year axis labels, shared across panels.
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One country's layer in a stacked-area chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
}

/// The full two-panel dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    pub charts: Vec<ChartSpec>,
}

/// Escape HTML special characters to prevent markup breakout.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl ChartSpec {
    /// Build one category's panel. Countries with an all-zero series are
    /// skipped; the remaining layers keep the shared country order, so the
    /// stack accumulates in the same order in both panels.
    #[must_use]
    pub fn stacked_area(outlook: &RetirementOutlook, category: FuelCategory) -> Self {
        let colors = assign_colors(&outlook.countries);
        let datasets = outlook
            .series(category)
            .iter()
            .filter(|(_, series)| series.iter().any(|v| *v > 0.0))
            .map(|(country, series)| Dataset {
                label: country.clone(),
                data: series.clone(),
                background_color: colors[country].clone(),
                border_color: colors[country].clone(),
            })
            .collect();

        ChartSpec {
            title: format!("Cumulative {category} Plant Decommissions by Country"),
            x_axis_label: "Year".to_string(),
            y_axis_label: "Cumulative Capacity Decommissioned (GW)".to_string(),
            labels: outlook.years.iter().map(ToString::to_string).collect(),
            datasets,
        }
    }
}

impl Dashboard {
    /// Build the coal and gas panels from an aggregated outlook.
    #[must_use]
    pub fn from_outlook(outlook: &RetirementOutlook) -> Self {
        Dashboard {
            title: "Planned Plant Decommissions in Europe".to_string(),
            charts: vec![
                ChartSpec::stacked_area(outlook, FuelCategory::Coal),
                ChartSpec::stacked_area(outlook, FuelCategory::Gas),
            ],
        }
    }

    /// Convert to JSON for non-HTML consumers.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, VizError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Generate an HTML page with the panels side by side, rendered by
    /// Chart.js as stacked filled line charts.
    pub fn to_html(&self) -> Result<String, VizError> {
        // Escape title for HTML context and JSON for script context
        let title = escape_html(&self.title);
        let json = serde_json::to_string(self)?.replace("</", "<\\/"); // Prevent script tag breakout

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        .panels {{ display: flex; gap: 1em; }}
        .panels > div {{ flex: 1; min-width: 0; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <div class="panels" id="panels"></div>
    <script>
        const spec = {json};
        const panels = document.getElementById('panels');
        for (const chart of spec.charts) {{
            const holder = document.createElement('div');
            const canvas = document.createElement('canvas');
            holder.appendChild(canvas);
            panels.appendChild(holder);
            new Chart(canvas.getContext('2d'), {{
                type: 'line',
                data: {{
                    labels: chart.labels,
                    datasets: chart.datasets.map(d => ({{
                        label: d.label,
                        data: d.data,
                        backgroundColor: d.background_color,
                        borderColor: d.border_color,
                        fill: true,
                        pointRadius: 0,
                    }})),
                }},
                options: {{
                    responsive: true,
                    plugins: {{
                        title: {{ display: true, text: chart.title }},
                        legend: {{ position: 'top' }},
                    }},
                    scales: {{
                        x: {{ title: {{ display: true, text: chart.x_axis_label }} }},
                        y: {{
                            stacked: true,
                            title: {{ display: true, text: chart.y_axis_label }},
                        }},
                    }},
                }},
            }});
        }}
    </script>
</body>
</html>"#
        ))
    }
}
