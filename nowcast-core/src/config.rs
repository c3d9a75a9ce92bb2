use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::provider::ProviderId;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Language of the free-text nowcast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLanguage {
    #[default]
    En,
    De,
    Nl,
}

impl MessageLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLanguage::En => "en",
            MessageLanguage::De => "de",
            MessageLanguage::Nl => "nl",
        }
    }

    pub const fn all() -> &'static [MessageLanguage] {
        &[MessageLanguage::En, MessageLanguage::De, MessageLanguage::Nl]
    }
}

impl fmt::Display for MessageLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL templates for every external API.
///
/// `{lat}`, `{lon}` and `{query}` are substituted at request time; each
/// provider decides how many decimals it sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub buienalarm: String,
    pub buienalarm_classic: String,
    pub buienradar: String,
    pub geocode: String,
    pub reverse_geocode: String,
    pub ip_geolocation: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            buienalarm: "https://cdn.buienalarm.nl/api/4.0/nowcast/timeseries/{lat}/{lon}".into(),
            buienalarm_classic:
                "https://cdn-secure.buienalarm.nl/api/3.4/forecast.php?lat={lat}&lon={lon}&region=nl&unit=mm/u"
                    .into(),
            buienradar:
                "https://graphdata.buienradar.nl/3.0/forecast/geo/RainHistoryForecast?lat={lat}&lon={lon}"
                    .into(),
            geocode: "https://nominatim.openstreetmap.org/search?q={query}&format=json".into(),
            reverse_geocode:
                "https://us1.api-bdc.net/data/reverse-geocode-client?latitude={lat}&longitude={lon}&localityLanguage=en"
                    .into(),
            ip_geolocation: "https://geoip.maxmind.com/geoip/v2.1/city/me".into(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// primary_provider = "buienalarm"
/// compare_enabled = true
/// compare_provider = "buienradar"
/// language = "nl"
///
/// [endpoints]
/// geocode = "https://nominatim.example.org/search?q={query}&format=json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub primary_provider: ProviderId,
    pub compare_enabled: bool,
    pub compare_provider: ProviderId,
    pub language: MessageLanguage,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_provider: ProviderId::Buienalarm,
            compare_enabled: true,
            compare_provider: ProviderId::Buienradar,
            language: MessageLanguage::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Provider drawn next to the primary one, if any.
    ///
    /// Comparing a provider with itself is pointless, so that case yields `None`.
    pub fn comparison(&self) -> Option<ProviderId> {
        (self.compare_enabled && self.compare_provider != self.primary_provider)
            .then_some(self.compare_provider)
    }

    pub fn set_comparison(&mut self, id: Option<ProviderId>) {
        match id {
            Some(id) => {
                self.compare_enabled = true;
                self.compare_provider = id;
            }
            None => self.compare_enabled = false,
        }
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nowcast", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
