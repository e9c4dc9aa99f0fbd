//! Error types
//!
//! Typed errors carry detail for logs; [`ErrorKind`] is the single
//! user-facing slot the view shows.

use thiserror::Error;

/// The four causes the view can report
///
/// Only one is shown at a time; the most recent write wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedCapability,
    AcquisitionFailed,
    WeatherFetchError,
    AddressFetchError,
}

impl ErrorKind {
    /// Fixed message for display
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedCapability => "Geolocation is not supported on this system",
            ErrorKind::AcquisitionFailed => "Could not determine your location",
            ErrorKind::WeatherFetchError => "Failed to fetch weather information",
            ErrorKind::AddressFetchError => "Failed to fetch address information",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug)]
pub enum GeolocationError {
    #[error("no position source available")]
    Unsupported,

    #[error("position request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("position source failed: {0}")]
    Source(String),
}

impl GeolocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported => ErrorKind::UnsupportedCapability,
            Self::Timeout(_) | Self::Source(_) => ErrorKind::AcquisitionFailed,
        }
    }
}

impl From<reqwest::Error> for GeolocationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Source(err.to_string())
    }
}

/// Failure of a single HTTP round trip to the weather or address service
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("weather API key is missing (set OPENWEATHER_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("map zoom {0} is outside 1..=19")]
    InvalidZoom(u8),

    #[error("coordinates ({0}, {1}) are out of range")]
    InvalidCoordinates(f64, f64),
}

/// Anything that prevents the pipeline from being assembled
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("geolocation setup failed: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("http client setup failed: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_geolocation_error_kinds() {
        assert_eq!(
            GeolocationError::Unsupported.kind(),
            ErrorKind::UnsupportedCapability
        );
        assert_eq!(
            GeolocationError::Timeout(Duration::from_secs(10)).kind(),
            ErrorKind::AcquisitionFailed
        );
        assert_eq!(
            GeolocationError::Source("denied".into()).kind(),
            ErrorKind::AcquisitionFailed
        );
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let kinds = [
            ErrorKind::UnsupportedCapability,
            ErrorKind::AcquisitionFailed,
            ErrorKind::WeatherFetchError,
            ErrorKind::AddressFetchError,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
        assert!(ErrorKind::WeatherFetchError.to_string().contains("weather"));
    }
}
