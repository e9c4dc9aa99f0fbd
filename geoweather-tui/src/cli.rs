//! Command line arguments
//!
//! Every flag that matters in deployment also reads an environment variable,
//! and `main` loads `.env` before parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use geoweather_core::config::{
    DEFAULT_GEOCODE_BASE_URL, DEFAULT_ICON_BASE_URL, DEFAULT_IP_LOCATOR_BASE_URL, DEFAULT_LANG,
    DEFAULT_MAP_ZOOM, DEFAULT_TILE_URL_TEMPLATE, DEFAULT_WEATHER_BASE_URL,
};
use geoweather_core::{Config, ConfigError, Coordinates, LocatorConfig, StalePolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocatorKind {
    /// Approximate position from the public IP address
    Ip,
    /// No position source; locating reports an unsupported capability
    #[value(name = "none")]
    Disabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StalePolicyArg {
    /// Drop results from superseded acquisitions
    Discard,
    /// Apply every result as it arrives
    LastResponseWins,
}

impl From<StalePolicyArg> for StalePolicy {
    fn from(arg: StalePolicyArg) -> Self {
        match arg {
            StalePolicyArg::Discard => StalePolicy::Discard,
            StalePolicyArg::LastResponseWins => StalePolicy::LastResponseWins,
        }
    }
}

/// Current weather and address for where you are
#[derive(Parser, Debug)]
#[command(name = "geoweather", version)]
#[command(about = "Current weather and address for where you are")]
pub struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language for weather descriptions
    #[arg(long, env = "GEOWEATHER_LANG", default_value = DEFAULT_LANG)]
    pub lang: String,

    /// Fixed latitude instead of looking the position up; overrides --locator
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Fixed longitude instead of looking the position up
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Position source
    #[arg(long, value_enum, env = "GEOWEATHER_LOCATOR", default_value_t = LocatorKind::Ip)]
    pub locator: LocatorKind,

    /// Initial map zoom (1-19)
    #[arg(long, default_value_t = DEFAULT_MAP_ZOOM)]
    pub zoom: u8,

    /// What to do with results from a superseded acquisition
    #[arg(long, value_enum, default_value_t = StalePolicyArg::Discard)]
    pub stale_policy: StalePolicyArg,

    /// Per-request timeout for the weather and address fetches
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,

    /// Write logs to this file (the terminal is in use)
    #[arg(long, env = "GEOWEATHER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Locate once, print a summary and exit
    #[arg(long)]
    pub once: bool,

    #[arg(long, env = "GEOWEATHER_WEATHER_URL", default_value = DEFAULT_WEATHER_BASE_URL, hide = true)]
    pub weather_url: String,

    #[arg(long, env = "GEOWEATHER_ICON_URL", default_value = DEFAULT_ICON_BASE_URL, hide = true)]
    pub icon_url: String,

    #[arg(long, env = "GEOWEATHER_GEOCODE_URL", default_value = DEFAULT_GEOCODE_BASE_URL, hide = true)]
    pub geocode_url: String,

    #[arg(long, env = "GEOWEATHER_IP_LOCATOR_URL", default_value = DEFAULT_IP_LOCATOR_BASE_URL, hide = true)]
    pub ip_locator_url: String,

    #[arg(long, env = "GEOWEATHER_TILE_URL", default_value = DEFAULT_TILE_URL_TEMPLATE, hide = true)]
    pub tile_url: String,
}

impl Args {
    /// Build and validate the pipeline configuration
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        config.weather.api_key = self.api_key.clone().unwrap_or_default();
        config.weather.lang = self.lang.clone();
        config.weather.base_url = self.weather_url.clone();
        config.weather.icon_base_url = self.icon_url.clone();
        config.geocode.base_url = self.geocode_url.clone();

        config.geolocation.locator = match (self.lat, self.lon, self.locator) {
            (Some(lat), Some(lon), _) => LocatorConfig::Fixed(Coordinates::new(lat, lon)),
            (_, _, LocatorKind::Ip) => LocatorConfig::Ip {
                base_url: self.ip_locator_url.clone(),
            },
            (_, _, LocatorKind::Disabled) => LocatorConfig::Disabled,
        };

        config.map.zoom = self.zoom;
        config.map.tile_url_template = self.tile_url.clone();
        config.stale_policy = self.stale_policy.into();
        config.http_timeout = self.http_timeout.map(Duration::from_secs);

        config.validate()?;
        Ok(config)
    }
}
