//! Runtime configuration
//!
//! Front ends build a [`Config`] (the TUI does it from CLI flags and the
//! environment) and call [`Config::validate`] before starting the pipeline.

use std::time::Duration;

use crate::error::ConfigError;
use crate::geolocation::PositionOptions;
use crate::model::Coordinates;
use crate::state::StalePolicy;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_IP_LOCATOR_BASE_URL: &str = "https://ipinfo.io";
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_LANG: &str = "ja";
pub const DEFAULT_MAP_ZOOM: u8 = 13;
pub const MIN_MAP_ZOOM: u8 = 1;
pub const MAX_MAP_ZOOM: u8 = 19;

const USER_AGENT: &str = concat!(
    "geoweather/",
    env!("CARGO_PKG_VERSION"),
    " (terminal weather client)"
);

#[derive(Clone, Debug)]
pub struct WeatherApiConfig {
    pub base_url: String,
    pub icon_base_url: String,
    pub api_key: String,
    /// Language for condition descriptions
    pub lang: String,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_BASE_URL.into(),
            icon_base_url: DEFAULT_ICON_BASE_URL.into(),
            api_key: String::new(),
            lang: DEFAULT_LANG.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeocodeApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for GeocodeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODE_BASE_URL.into(),
            user_agent: USER_AGENT.into(),
        }
    }
}

/// Which position source backs geolocation
#[derive(Clone, Debug, PartialEq)]
pub enum LocatorConfig {
    /// IP-based lookup against an ipinfo-style endpoint
    Ip { base_url: String },
    /// Always report the given coordinates
    Fixed(Coordinates),
    /// No source; acquisition reports an unsupported capability
    Disabled,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig::Ip {
            base_url: DEFAULT_IP_LOCATOR_BASE_URL.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GeolocationConfig {
    pub locator: LocatorConfig,
    pub options: PositionOptions,
}

#[derive(Clone, Debug)]
pub struct MapConfig {
    pub zoom: u8,
    pub tile_url_template: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_MAP_ZOOM,
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub weather: WeatherApiConfig,
    pub geocode: GeocodeApiConfig,
    pub geolocation: GeolocationConfig,
    pub map: MapConfig,
    pub stale_policy: StalePolicy,
    /// Per-request timeout for the two HTTP fetches; transport default when unset
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !(MIN_MAP_ZOOM..=MAX_MAP_ZOOM).contains(&self.map.zoom) {
            return Err(ConfigError::InvalidZoom(self.map.zoom));
        }
        if let LocatorConfig::Fixed(coords) = &self.geolocation.locator {
            if !coords.is_valid() {
                return Err(ConfigError::InvalidCoordinates(
                    coords.latitude,
                    coords.longitude,
                ));
            }
        }
        Ok(())
    }
}
