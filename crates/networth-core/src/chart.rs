// ── Chart data guard ──
//
// Charts are drawn from backend-derived numbers. A series is sanitized
// before any widget sees it so that a single bad data point turns into a
// fallback panel for that chart instead of a broken page.

use serde::Serialize;
use thiserror::Error;

use crate::model::AssetRecord;

/// One labelled value of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A titled sequence of points (bars or allocation slices).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

/// Why a series cannot be charted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("no data to chart")]
    Empty,

    #[error("value for {label} is not a finite number")]
    NonFinite { label: String },

    #[error("total is negative ({total:.2})")]
    NegativeTotal { total: f64 },
}

impl ChartSeries {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(ChartPoint {
            label: label.into(),
            value,
        });
    }

    /// Sum of all point values.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Check the series is drawable, dropping zero-valued points.
    pub fn sanitize(mut self) -> Result<Self, ChartError> {
        if let Some(bad) = self.points.iter().find(|p| !p.value.is_finite()) {
            return Err(ChartError::NonFinite {
                label: bad.label.clone(),
            });
        }
        self.points.retain(|p| p.value != 0.0);
        if self.points.is_empty() {
            return Err(ChartError::Empty);
        }
        let total = self.total();
        if total < 0.0 {
            return Err(ChartError::NegativeTotal { total });
        }
        Ok(self)
    }

    /// Percentage share of each point, for allocation legends.
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        self.points
            .iter()
            .map(|p| {
                let pct = if total > 0.0 { p.value / total * 100.0 } else { 0.0 };
                (p.label.as_str(), pct)
            })
            .collect()
    }

    /// Largest value, used to scale bar charts.
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

/// Series of each record's market value, largest first.
pub fn value_series<T: AssetRecord>(title: impl Into<String>, items: &[T]) -> ChartSeries {
    let mut series = ChartSeries::new(title);
    for item in items {
        series.push(item.display_name(), item.market_value());
    }
    series
        .points
        .sort_by(|a, b| b.value.total_cmp(&a.value));
    series
}
