//! Shared GET-and-decode plumbing for every external API.

use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, WeatherError};

/// Replace `{key}` placeholders in a URL template.
pub(crate) fn fill_template(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_owned(), |url, (key, value)| {
        url.replace(&format!("{{{key}}}"), value)
    })
}

/// Issue one GET and decode the JSON body into `T`.
///
/// The body is read to the end before the status is inspected, so the
/// connection goes back to the pool on every path.
pub(crate) async fn get_json<T: DeserializeOwned>(http: &Client, url: &str) -> Result<T> {
    debug!(%url, "requesting");

    let res = http
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| WeatherError::Http {
            url: url.to_owned(),
            source,
        })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| WeatherError::Http {
        url: url.to_owned(),
        source,
    })?;

    if status != StatusCode::OK {
        return Err(WeatherError::HttpStatus {
            url: url.to_owned(),
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| WeatherError::Decode {
        url: url.to_owned(),
        source,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
