use std::num::ParseFloatError;

use reqwest::StatusCode;
use thiserror::Error;

use crate::provider::ProviderId;

/// Errors raised while resolving a location or fetching a forecast.
///
/// Every variant is built where the failure happens and travels up to the
/// binary unchanged; nothing in the core retries.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport failure, including the request timeout.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status code {status} from {url}: {body}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("forecast not available for this location ({provider})")]
    NotAvailable { provider: ProviderId },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} reported a failure for this request")]
    ProviderFailure { provider: ProviderId },

    #[error("no results found for '{query}'")]
    NotFound { query: String },

    #[error("geocoding result has an invalid {field} '{value}': {source}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid timestamp '{value}' in forecast: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{message}")]
    Config { message: String },
}

impl WeatherError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for the HTTP-level failures (transport or non-200 status).
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::HttpStatus { .. })
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_available_mentions_provider() {
        let err = WeatherError::NotAvailable {
            provider: ProviderId::Buienradar,
        };
        assert_eq!(
            err.to_string(),
            "forecast not available for this location (buienradar)"
        );
    }

    #[test]
    fn status_error_is_http() {
        let err = WeatherError::HttpStatus {
            url: "http://localhost/x".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert!(err.is_http());
        assert!(err.to_string().contains("500"));
        assert!(!WeatherError::config("x").is_http());
    }

    #[test]
    fn invalid_coordinate_keeps_source() {
        let source = "abc".parse::<f64>().unwrap_err();
        let err = WeatherError::InvalidCoordinate {
            field: "lat",
            value: "abc".into(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("invalid lat 'abc'"));
    }
}
