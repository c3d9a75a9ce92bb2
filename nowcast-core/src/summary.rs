use std::fmt::{self, Display};

use chrono::{Local, TimeZone};

use crate::{model::Forecast, normalize::format_clock};

/// Rain severity of a forecast, from its peak rate in mm/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RainIntensity {
    None,
    Light,
    Moderate,
    Heavy,
}

impl RainIntensity {
    pub const LIGHT_MAX: f64 = 0.25;
    pub const MODERATE_MAX: f64 = 1.0;

    pub fn classify(max_precipitation: f64) -> Self {
        if max_precipitation <= 0.0 {
            RainIntensity::None
        } else if max_precipitation <= Self::LIGHT_MAX {
            RainIntensity::Light
        } else if max_precipitation <= Self::MODERATE_MAX {
            RainIntensity::Moderate
        } else {
            RainIntensity::Heavy
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            RainIntensity::None => "No rain expected.",
            RainIntensity::Light => "Light rain expected.",
            RainIntensity::Moderate => "Moderate rain expected.",
            RainIntensity::Heavy => "Heavy rain expected.",
        }
    }
}

impl Display for RainIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

/// One-line rain summary with the onset time in local time.
pub fn rain_summary(forecast: &Forecast) -> String {
    rain_summary_in(forecast, &Local)
}

/// One-line rain summary, formatting the onset time in `tz`.
///
/// The onset sentence is only added when it is dry at the first point
/// but rain shows up later.
pub fn rain_summary_in<Tz>(forecast: &Forecast, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let intensity = RainIntensity::classify(forecast.max_precipitation());
    let mut summary = intensity.sentence().to_string();

    if intensity == RainIntensity::None {
        return summary;
    }

    let raining_now = forecast
        .points
        .first()
        .is_some_and(|p| p.precipitation > 0.0);

    if raining_now {
        return summary;
    }

    if let Some(onset) = forecast.points.iter().find(|p| p.precipitation > 0.0) {
        summary.push_str(&format!(
            " Next rain starts at {}.",
            format_clock(onset.timestamp, tz)
        ));
    }

    summary
}
