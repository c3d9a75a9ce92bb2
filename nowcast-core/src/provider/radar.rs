use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{
    context::Context,
    error::{Result, WeatherError},
    model::{Forecast, ForecastPoint},
    normalize::retain_upcoming,
};

use super::{NowcastProvider, ProviderId, get_nowcast};

const UTC_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Buienradar graph data: radar history followed by the forecast, in mm/h.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuienradarProvider;

#[derive(Debug, Deserialize)]
pub(crate) struct RadarResponse {
    #[serde(default)]
    forecasts: Vec<RadarEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarEntry {
    utc_date_time: String,
    data_value: f64,
}

fn parse_utc(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, UTC_DATE_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| WeatherError::InvalidTimestamp {
            value: value.to_owned(),
            source,
        })
}

impl RadarResponse {
    pub(crate) fn into_forecast(self, now: DateTime<Utc>) -> Result<Forecast> {
        let points = self
            .forecasts
            .iter()
            .map(|entry| Ok(ForecastPoint::new(parse_utc(&entry.utc_date_time)?, entry.data_value)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Forecast {
            points: retain_upcoming(points, now),
            description: None,
            temperature: None,
        })
    }
}

#[async_trait]
impl NowcastProvider for BuienradarProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Buienradar
    }

    async fn fetch(&self, ctx: &Context, latitude: f64, longitude: f64) -> Result<Forecast> {
        let response: RadarResponse = get_nowcast(
            ctx,
            self.id(),
            &ctx.config().endpoints.buienradar,
            &format!("{latitude:.3}"),
            &format!("{longitude:.3}"),
        )
        .await?;

        response.into_forecast(Utc::now())
    }
}
