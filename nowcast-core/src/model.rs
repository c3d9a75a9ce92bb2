use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place to show the forecast for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(description: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            description: description.into(),
            latitude,
            longitude,
        }
    }

    /// Description used when nothing better is known about a coordinate pair.
    pub fn coordinates_description(latitude: f64, longitude: f64) -> String {
        format!("Lat {latitude:.2}, Lon {longitude:.2}")
    }
}

/// One precipitation sample, in mm/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub precipitation: f64,
}

impl ForecastPoint {
    pub fn new(timestamp: DateTime<Utc>, precipitation: f64) -> Self {
        Self {
            timestamp,
            precipitation: precipitation.max(0.0),
        }
    }
}

/// Provider-agnostic nowcast.
///
/// `points` keep the order the provider delivered them in, which every
/// provider so far sends ascending by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
    pub description: Option<String>,
    pub temperature: Option<i32>,
}

impl Forecast {
    pub fn max_precipitation(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.precipitation)
            .fold(0.0, f64::max)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(|p| p.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
