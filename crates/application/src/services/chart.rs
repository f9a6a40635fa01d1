//! Temperature chart
//!
//! Line chart of recent temperatures. There is no history source; callers
//! supply the values. Serializes to the data/options shape of a Chart.js
//! line chart.

use serde::Serialize;

/// X axis labels, newest first
pub const CHART_LABELS: [&str; 4] = ["Now", "1h Ago", "2h Ago", "3h Ago"];

const DATASET_LABEL: &str = "Temperature (°C)";
const BORDER_COLOR: &str = "rgba(75, 192, 192, 1)";

/// One series of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub fill: bool,
}

/// Chart data block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub y: AxisOptions,
}

/// Chart options block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub scales: Scales,
}

/// Line chart of temperatures at fixed hourly labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureChart {
    pub data: ChartData,
    pub options: ChartOptions,
}

impl TemperatureChart {
    /// Chart over the given temperatures, newest first
    #[must_use]
    pub fn new(temperatures: Vec<f64>) -> Self {
        Self {
            data: ChartData {
                labels: CHART_LABELS.to_vec(),
                datasets: vec![Dataset {
                    label: DATASET_LABEL,
                    data: temperatures,
                    border_color: BORDER_COLOR,
                    fill: false,
                }],
            },
            options: ChartOptions {
                responsive: true,
                scales: Scales {
                    y: AxisOptions {
                        begin_at_zero: false,
                    },
                },
            },
        }
    }

    /// Label/value pairs; labels without a value are skipped
    #[must_use]
    pub fn points(&self) -> Vec<(&'static str, f64)> {
        let values = self
            .data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or_default();
        self.data
            .labels
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect()
    }
}
