//! Application state - single source of truth
//!
//! Components receive `&AppState`; only the reducer mutates it.

use crate::config::{Config, DEFAULT_MAP_ZOOM};
use crate::error::ErrorKind;
use crate::model::{AddressResult, Coordinates, WeatherResult};

/// What to do with a fetch result that belongs to an older acquisition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Drop results whose tag does not match the current generation
    #[default]
    Discard,
    /// Apply every result in completion order
    LastResponseWins,
}

/// Identifies which acquisition a fetch belongs to
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FetchTag {
    pub generation: u64,
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub coordinates: Option<Coordinates>,
    pub weather: Option<WeatherResult>,
    pub address: Option<AddressResult>,
    /// Most recent error; replaced, never accumulated
    pub error: Option<ErrorKind>,

    /// Set once at startup from the position source
    pub geolocation_supported: bool,
    /// A position request is in flight
    pub locating: bool,
    pub weather_pending: bool,
    pub address_pending: bool,

    /// Bumped on every successful acquisition
    pub generation: u64,
    pub stale_policy: StalePolicy,

    pub map_zoom: u8,
    pub tick_count: u32,
}

impl AppState {
    pub fn new(geolocation_supported: bool, stale_policy: StalePolicy, map_zoom: u8) -> Self {
        Self {
            coordinates: None,
            weather: None,
            address: None,
            error: None,
            geolocation_supported,
            locating: false,
            weather_pending: false,
            address_pending: false,
            generation: 0,
            stale_policy,
            map_zoom,
            tick_count: 0,
        }
    }

    pub fn from_config(config: &Config, geolocation_supported: bool) -> Self {
        Self::new(geolocation_supported, config.stale_policy, config.map.zoom)
    }

    /// Any network or position request outstanding
    pub fn is_busy(&self) -> bool {
        self.locating || self.weather_pending || self.address_pending
    }

    /// Whether a result tagged `tag` should be applied under the current policy
    pub fn accepts(&self, tag: &FetchTag) -> bool {
        match self.stale_policy {
            StalePolicy::Discard => tag.generation == self.generation,
            StalePolicy::LastResponseWins => true,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true, StalePolicy::default(), DEFAULT_MAP_ZOOM)
    }
}
