//! Adapting forecasts into plain numeric series for chart renderers.

use chrono::{DateTime, Utc};

use crate::model::{Forecast, ForecastPoint};

/// Display colour tag attached to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Cyan,
    Purple,
    Yellow,
}

impl SeriesColor {
    /// Colour for the n-th series drawn on one chart.
    pub fn nth(index: usize) -> Self {
        match index % 3 {
            0 => SeriesColor::Cyan,
            1 => SeriesColor::Purple,
            _ => SeriesColor::Yellow,
        }
    }
}

/// `(epoch seconds, mm/h)` pairs in forecast order, with a colour tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn from_points(label: impl Into<String>, color: SeriesColor, points: &[ForecastPoint]) -> Self {
        Self {
            label: label.into(),
            color,
            points: points
                .iter()
                .map(|p| (p.timestamp.timestamp() as f64, p.precipitation))
                .collect(),
        }
    }

    pub fn from_forecast(label: impl Into<String>, color: SeriesColor, forecast: &Forecast) -> Self {
        Self::from_points(label, color, &forecast.points)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest x value, assuming ascending order.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    pub fn max_y(&self) -> f64 {
        self.points.iter().map(|(_, y)| *y).fold(0.0, f64::max)
    }
}

/// Points up to and including `cutoff`; everything from the first later point on is dropped.
///
/// With no cutoff the points are returned unchanged.
pub fn truncate_after(points: &[ForecastPoint], cutoff: Option<DateTime<Utc>>) -> Vec<ForecastPoint> {
    match cutoff {
        Some(cutoff) => points
            .iter()
            .take_while(|p| p.timestamp <= cutoff)
            .copied()
            .collect(),
        None => points.to_vec(),
    }
}

/// Series for a primary forecast plus an optional comparison, the latter
/// cut so it never extends past the primary's last point.
pub fn comparison_series(
    primary: (&str, &Forecast),
    secondary: Option<(&str, &Forecast)>,
) -> Vec<Series> {
    let (primary_label, primary_forecast) = primary;
    let mut series = vec![Series::from_forecast(
        primary_label,
        SeriesColor::nth(0),
        primary_forecast,
    )];

    if let Some((label, forecast)) = secondary {
        let cut = truncate_after(&forecast.points, primary_forecast.last_timestamp());
        series.push(Series::from_points(label, SeriesColor::nth(1), &cut));
    }

    series
}
