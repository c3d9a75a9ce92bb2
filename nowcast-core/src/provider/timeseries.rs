use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    config::MessageLanguage,
    context::Context,
    error::Result,
    model::{Forecast, ForecastPoint},
    normalize::{retain_upcoming, substitute_timestamps, unix_to_utc},
};

use super::{NowcastProvider, ProviderId, get_nowcast};

/// Buienalarm v4 nowcast: per-sample timestamps and a templated message.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuienalarmProvider;

#[derive(Debug, Deserialize)]
pub(crate) struct TimeseriesResponse {
    #[serde(default)]
    data: Vec<TimeseriesEntry>,
    #[serde(default, rename = "nowcastmessage")]
    nowcast_message: NowcastMessage,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    #[serde(rename = "precipitationrate")]
    precipitation_rate: f64,
    timestamp: i64,
}

#[derive(Debug, Default, Deserialize)]
struct NowcastMessage {
    #[serde(default)]
    en: String,
    #[serde(default)]
    de: String,
    #[serde(default)]
    nl: String,
}

impl NowcastMessage {
    fn in_language(&self, language: MessageLanguage) -> &str {
        match language {
            MessageLanguage::En => &self.en,
            MessageLanguage::De => &self.de,
            MessageLanguage::Nl => &self.nl,
        }
    }
}

impl TimeseriesResponse {
    pub(crate) fn into_forecast(self, now: DateTime<Utc>, language: MessageLanguage) -> Forecast {
        let points = self.data.iter().filter_map(|entry| {
            unix_to_utc(entry.timestamp).map(|ts| ForecastPoint::new(ts, entry.precipitation_rate))
        });

        let message = self.nowcast_message.in_language(language).trim();
        let description = (!message.is_empty()).then(|| substitute_timestamps(message));

        Forecast {
            points: retain_upcoming(points, now),
            description,
            temperature: None,
        }
    }
}

#[async_trait]
impl NowcastProvider for BuienalarmProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Buienalarm
    }

    async fn fetch(&self, ctx: &Context, latitude: f64, longitude: f64) -> Result<Forecast> {
        let response: TimeseriesResponse = get_nowcast(
            ctx,
            self.id(),
            &ctx.config().endpoints.buienalarm,
            &format!("{latitude:.2}"),
            &format!("{longitude:.2}"),
        )
        .await?;

        Ok(response.into_forecast(Utc::now(), ctx.config().language))
    }
}
