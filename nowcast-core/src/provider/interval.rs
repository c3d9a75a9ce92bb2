use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, de::Error};

use crate::{
    context::Context,
    error::{Result, WeatherError},
    model::{Forecast, ForecastPoint},
    normalize::{retain_upcoming, unix_to_utc},
};

use super::{NowcastProvider, ProviderId, get_nowcast};

/// Seconds between samples when the payload does not say otherwise.
pub const DEFAULT_CADENCE_SECS: i64 = 300;

/// Buienalarm v3 forecast: one `start`, a fixed cadence and a rate array.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuienalarmClassicProvider;

#[derive(Debug, Deserialize)]
pub(crate) struct IntervalResponse {
    #[serde(default)]
    success: bool,
    start: Option<i64>,
    delta: Option<i64>,
    #[serde(default)]
    precip: Vec<f64>,
    temp: Option<f64>,
}

impl IntervalResponse {
    /// `None` when the payload's delta does not fit in a duration.
    fn cadence(&self) -> Option<Duration> {
        match self.delta {
            Some(delta) if delta > 0 => Duration::try_seconds(delta),
            _ => Duration::try_seconds(DEFAULT_CADENCE_SECS),
        }
    }

    pub(crate) fn into_forecast(self, now: DateTime<Utc>, url: &str) -> Result<Forecast> {
        let provider = ProviderId::BuienalarmClassic;
        if !self.success {
            return Err(WeatherError::ProviderFailure { provider });
        }

        let start = self
            .start
            .and_then(unix_to_utc)
            .ok_or_else(|| decode_error(url, Error::missing_field("start")))?;

        let out_of_range = || decode_error(url, Error::custom("delta puts samples out of range"));
        let cadence = self.cadence().ok_or_else(out_of_range)?;
        let points = self
            .precip
            .iter()
            .enumerate()
            .map(|(i, rate)| {
                let offset = i32::try_from(i).ok().and_then(|i| cadence.checked_mul(i))?;
                let timestamp = start.checked_add_signed(offset)?;
                Some(ForecastPoint::new(timestamp, *rate))
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(out_of_range)?;

        Ok(Forecast {
            points: retain_upcoming(points, now),
            description: None,
            temperature: self.temp.map(|t| t.round() as i32),
        })
    }
}

fn decode_error(url: &str, source: serde_json::Error) -> WeatherError {
    WeatherError::Decode {
        url: url.to_owned(),
        source,
    }
}

#[async_trait]
impl NowcastProvider for BuienalarmClassicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::BuienalarmClassic
    }

    async fn fetch(&self, ctx: &Context, latitude: f64, longitude: f64) -> Result<Forecast> {
        let template = &ctx.config().endpoints.buienalarm_classic;
        let response: IntervalResponse = get_nowcast(
            ctx,
            self.id(),
            template,
            &format!("{latitude:.3}"),
            &format!("{longitude:.3}"),
        )
        .await?;

        response.into_forecast(Utc::now(), template)
    }
}
