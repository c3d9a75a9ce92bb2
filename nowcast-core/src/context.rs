use std::time::Duration;

use reqwest::Client;

use crate::{config::Config, error::WeatherError};

const USER_AGENT: &str = concat!("weather-nowcast/", env!("CARGO_PKG_VERSION"));

/// Everything a resolver or provider needs for one invocation.
///
/// Built once at startup and handed to each call by reference.
#[derive(Debug, Clone)]
pub struct Context {
    config: Config,
    http: Client,
}

impl Context {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        if config.timeout_secs == 0 {
            return Err(WeatherError::config("timeout_secs must be at least 1 second"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http(&self) -> &Client {
        &self.http
    }
}
