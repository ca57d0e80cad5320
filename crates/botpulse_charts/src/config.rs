//! Chart descriptions in the shape a canvas charting library expects as
//! its constructor argument.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Pie => write!(f, "pie"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// Label/value pairs of the first dataset.
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        let values = self
            .data
            .datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or_default();

        self.data
            .labels
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
    }

    pub fn title(&self) -> &str {
        self.data
            .datasets
            .first()
            .map(|dataset| dataset.label.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    #[serde(rename = "backgroundColor")]
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    #[serde(rename = "beginAtZero")]
    pub begin_at_zero: bool,
}
