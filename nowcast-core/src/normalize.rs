//! Turning raw provider samples into what the rest of the app shows.

use std::{fmt::Display, sync::OnceLock};

use chrono::{DateTime, Local, TimeZone, Utc};
use regex::{Captures, Regex};
use tracing::debug;

use crate::model::ForecastPoint;

/// Clock format used everywhere a time is shown to the user.
pub const CLOCK_FORMAT: &str = "%H:%M";

static TIMESTAMP_TOKEN: OnceLock<Regex> = OnceLock::new();

fn timestamp_token() -> &'static Regex {
    TIMESTAMP_TOKEN.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("static regex is valid"))
}

/// Keep only the points strictly after `now`, in their original order.
pub fn retain_upcoming<I>(points: I, now: DateTime<Utc>) -> Vec<ForecastPoint>
where
    I: IntoIterator<Item = ForecastPoint>,
{
    let mut dropped = 0usize;
    let kept: Vec<_> = points
        .into_iter()
        .filter(|p| {
            let keep = p.timestamp > now;
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    debug!(kept = kept.len(), dropped, "filtered past forecast points");
    kept
}

/// Convert unix seconds to a UTC instant.
pub fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Format an instant as 24-hour `HH:MM` in the given zone.
pub fn format_clock<Tz>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(CLOCK_FORMAT).to_string()
}

/// Format an instant as local `HH:MM`.
pub fn format_local_clock(ts: DateTime<Utc>) -> String {
    format_clock(ts, &Local)
}

/// Rewrite `{unixtimestamp}` tokens into local `HH:MM` times.
pub fn substitute_timestamps(message: &str) -> String {
    substitute_timestamps_in(message, &Local)
}

/// Rewrite `{unixtimestamp}` tokens into `HH:MM` times in `tz`.
///
/// Tokens whose number does not fit a timestamp are left untouched, as is
/// anything between braces that is not all digits.
pub fn substitute_timestamps_in<Tz>(message: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp_token()
        .replace_all(message, |caps: &Captures<'_>| {
            caps[1]
                .parse::<i64>()
                .ok()
                .and_then(unix_to_utc)
                .map(|ts| format_clock(ts, tz))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
