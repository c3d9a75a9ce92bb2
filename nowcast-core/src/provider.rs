use crate::{
    context::Context,
    error::{Result, WeatherError},
    http::{fill_template, get_json},
    model::Forecast,
    provider::{interval::BuienalarmClassicProvider, radar::BuienradarProvider, timeseries::BuienalarmProvider},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use tracing::debug;

pub mod interval;
pub mod radar;
pub mod timeseries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    /// Buienalarm v4 timeseries with a templated nowcast message.
    Buienalarm,
    /// Buienalarm v3 fixed-cadence array with temperature.
    BuienalarmClassic,
    /// Buienradar rain history/forecast graph data.
    Buienradar,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Buienalarm => "buienalarm",
            ProviderId::BuienalarmClassic => "buienalarm-classic",
            ProviderId::Buienradar => "buienradar",
        }
    }

    /// Human-facing name for legends and headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Buienalarm => "Buienalarm",
            ProviderId::BuienalarmClassic => "Buienalarm (classic)",
            ProviderId::Buienradar => "Buienradar",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[
            ProviderId::Buienalarm,
            ProviderId::BuienalarmClassic,
            ProviderId::Buienradar,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = WeatherError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        ProviderId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == lower)
            .ok_or_else(|| {
                WeatherError::config(format!(
                    "Unknown provider '{value}'. Supported providers: buienalarm, buienalarm-classic, buienradar."
                ))
            })
    }
}

impl std::str::FromStr for ProviderId {
    type Err = WeatherError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProviderId::try_from(s)
    }
}

/// A nowcasting source that can be asked for the forecast at a coordinate.
#[async_trait]
pub trait NowcastProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Fetch and normalize the forecast; only points after the fetch instant survive.
    async fn fetch(&self, ctx: &Context, latitude: f64, longitude: f64) -> Result<Forecast>;
}

/// Construct the provider behind an id.
pub fn provider_for(id: ProviderId) -> Box<dyn NowcastProvider> {
    match id {
        ProviderId::Buienalarm => Box::new(BuienalarmProvider),
        ProviderId::BuienalarmClassic => Box::new(BuienalarmClassicProvider),
        ProviderId::Buienradar => Box::new(BuienradarProvider),
    }
}

/// Fetch one forecast from the provider behind `id`.
pub async fn fetch_forecast(
    ctx: &Context,
    id: ProviderId,
    latitude: f64,
    longitude: f64,
) -> Result<Forecast> {
    provider_for(id).fetch(ctx, latitude, longitude).await
}

/// GET a provider endpoint, treating 404 as "no forecast for this location".
pub(crate) async fn get_nowcast<T: DeserializeOwned>(
    ctx: &Context,
    id: ProviderId,
    template: &str,
    latitude: &str,
    longitude: &str,
) -> Result<T> {
    let url = fill_template(template, &[("lat", latitude), ("lon", longitude)]);
    debug!(provider = %id, %latitude, %longitude, "fetching nowcast");

    get_json(ctx.http(), &url).await.map_err(|err| match err {
        WeatherError::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND => {
            WeatherError::NotAvailable { provider: id }
        }
        other => other,
    })
}
