//! Domain data produced by the pipeline
//!
//! All values here are replaced wholesale when a new result arrives;
//! nothing is merged field by field.

use std::fmt;

/// A geographic position reported by a position source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {}, Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

/// Coarse weather classification reported by the weather service
///
/// Parsing is an exact, case-sensitive match on the service's `main` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Snow,
    Drizzle,
    Thunderstorm,
    Mist,
    Fog,
    /// Anything outside the fixed vocabulary, kept verbatim
    Unrecognized(String),
}

impl ConditionCategory {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Mist" => Self::Mist,
            "Fog" => Self::Fog,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Unrecognized(raw) => raw,
        }
    }
}

/// Current weather at a position
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherResult {
    pub condition: ConditionCategory,
    pub description: String,
    pub temperature_celsius: f64,
    pub icon_id: String,
}

/// Sentinel shown when no locality field is available
pub const UNKNOWN_LOCALITY: &str = "unknown";

/// Address resolved from a position
#[derive(Clone, Debug, PartialEq)]
pub struct AddressResult {
    pub country: Option<String>,
    pub region: Option<String>,
    /// First of city, town, village; [`UNKNOWN_LOCALITY`] when none is present
    pub locality: String,
}

impl AddressResult {
    /// Pick the locality by city > town > village precedence.
    ///
    /// Empty strings count as absent.
    pub fn pick_locality(
        city: Option<String>,
        town: Option<String>,
        village: Option<String>,
    ) -> String {
        [city, town, village]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCALITY.to_string())
    }
}
