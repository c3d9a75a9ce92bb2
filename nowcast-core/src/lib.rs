//! Core library for the `weather` rain nowcast CLI.
//!
//! This crate defines:
//! - Configuration and the per-run [`Context`]
//! - Location resolution (coordinates, place names, IP lookup)
//! - Nowcast providers and their normalization into one [`Forecast`] shape
//! - Rain summaries and chart series adaptation
//!
//! It is used by `nowcast-cli`, but does no terminal output of its own.

pub mod config;
pub mod context;
pub mod error;
mod http;
pub mod location;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod series;
pub mod summary;

pub use config::{Config, Endpoints, MessageLanguage};
pub use context::Context;
pub use error::WeatherError;
pub use location::{LocationQuery, resolve};
pub use model::{Forecast, ForecastPoint, Location};
pub use provider::{NowcastProvider, ProviderId, fetch_forecast, provider_for};
pub use series::{Series, SeriesColor, comparison_series};
pub use summary::{RainIntensity, rain_summary};
