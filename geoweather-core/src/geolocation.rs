//! Position acquisition
//!
//! [`Geolocator`] wraps an optional [`PositionSource`]. A missing source is
//! reported synchronously from [`Geolocator::acquire`], before any request
//! starts; every other failure surfaces when the returned future resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::{GeolocationConfig, LocatorConfig};
use crate::error::GeolocationError;
use crate::model::Coordinates;

/// Request options passed to every position source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound on a single acquisition
    pub timeout: Duration,
    /// Oldest cached fix a source may return; zero forces a fresh lookup
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Something that can report the current position
#[async_trait]
pub trait PositionSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

/// Reports the same coordinates every time
#[derive(Clone, Copy, Debug)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPosition {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    loc: String,
}

/// Approximate position from the caller's public IP address
pub struct IpPosition {
    http: reqwest::Client,
    base_url: String,
    last_fix: Mutex<Option<(Coordinates, Instant)>>,
}

impl IpPosition {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeolocationError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            last_fix: Mutex::new(None),
        })
    }

    async fn lookup(&self) -> Result<Coordinates, GeolocationError> {
        let url = format!("{}/json", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeolocationError::Source(format!(
                "ip lookup returned status {}",
                response.status()
            )));
        }
        let info: IpInfoResponse = response.json().await?;
        parse_loc(&info.loc)
    }
}

#[async_trait]
impl PositionSource for IpPosition {
    fn name(&self) -> &'static str {
        "ip"
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        if options.high_accuracy {
            tracing::debug!("ip position source cannot honor high accuracy; using best effort");
        }

        let mut last_fix = self.last_fix.lock().await;
        if let Some((coords, at)) = *last_fix {
            if !options.maximum_age.is_zero() && at.elapsed() <= options.maximum_age {
                tracing::debug!(?coords, "reusing cached ip position");
                return Ok(coords);
            }
        }

        let coords = self.lookup().await?;
        *last_fix = Some((coords, Instant::now()));
        Ok(coords)
    }
}

/// Parse ipinfo's `"lat,lon"` string
fn parse_loc(loc: &str) -> Result<Coordinates, GeolocationError> {
    let (lat, lon) = loc
        .split_once(',')
        .ok_or_else(|| GeolocationError::Source(format!("malformed loc {loc:?}")))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| GeolocationError::Source(format!("invalid latitude {lat:?}")))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|_| GeolocationError::Source(format!("invalid longitude {lon:?}")))?;
    Ok(Coordinates::new(latitude, longitude))
}

/// Single-shot position acquisition with a bounded wait
#[derive(Clone)]
pub struct Geolocator {
    source: Option<Arc<dyn PositionSource>>,
    options: PositionOptions,
}

impl std::fmt::Debug for Geolocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geolocator")
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .field("options", &self.options)
            .finish()
    }
}

impl Geolocator {
    pub fn new(source: Option<Arc<dyn PositionSource>>, options: PositionOptions) -> Self {
        Self { source, options }
    }

    /// A geolocator with no source at all
    pub fn unsupported() -> Self {
        Self::new(None, PositionOptions::default())
    }

    pub fn from_config(config: &GeolocationConfig) -> Result<Self, GeolocationError> {
        let source: Option<Arc<dyn PositionSource>> = match &config.locator {
            LocatorConfig::Ip { base_url } => Some(Arc::new(IpPosition::new(base_url.clone())?)),
            LocatorConfig::Fixed(coords) => Some(Arc::new(FixedPosition(*coords))),
            LocatorConfig::Disabled => None,
        };
        Ok(Self::new(source, config.options))
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    /// Start an acquisition.
    ///
    /// Returns `Err(Unsupported)` immediately when there is no source. The
    /// returned future fails with `Timeout` once `options.timeout` elapses.
    pub fn acquire(
        &self,
    ) -> Result<
        impl Future<Output = Result<Coordinates, GeolocationError>> + Send + 'static,
        GeolocationError,
    > {
        let source = self.source.clone().ok_or(GeolocationError::Unsupported)?;
        let options = self.options;

        Ok(async move {
            let coords =
                match tokio::time::timeout(options.timeout, source.current_position(&options))
                    .await
                {
                    Ok(result) => result?,
                    Err(_) => return Err(GeolocationError::Timeout(options.timeout)),
                };

            if !coords.is_valid() {
                return Err(GeolocationError::Source(format!(
                    "{} reported out-of-range coordinates {:?}",
                    source.name(),
                    coords
                )));
            }
            tracing::info!(source = source.name(), ?coords, "position acquired");
            Ok(coords)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct SlowSource;

    #[async_trait]
    impl PositionSource for SlowSource {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Coordinates, GeolocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinates::new(0.0, 0.0))
        }
    }

    struct DeniedSource;

    #[async_trait]
    impl PositionSource for DeniedSource {
        fn name(&self) -> &'static str {
            "denied"
        }

        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Coordinates, GeolocationError> {
            Err(GeolocationError::Source("permission denied".into()))
        }
    }

    #[tokio::test]
    async fn test_fixed_source_succeeds() {
        let geo = Geolocator::new(
            Some(Arc::new(FixedPosition(Coordinates::new(35.0, 139.0)))),
            PositionOptions::default(),
        );
        assert!(geo.is_supported());

        let coords = geo.acquire().expect("supported").await.expect("position");
        assert_eq!(coords, Coordinates::new(35.0, 139.0));
    }

    #[test]
    fn test_unsupported_is_synchronous() {
        // No runtime needed: the error is returned before anything is polled.
        let geo = Geolocator::unsupported();
        assert!(!geo.is_supported());
        assert!(matches!(geo.acquire(), Err(GeolocationError::Unsupported)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_acquisition_failed() {
        let geo = Geolocator::new(Some(Arc::new(SlowSource)), PositionOptions::default());

        let err = geo.acquire().expect("supported").await.unwrap_err();
        assert!(matches!(err, GeolocationError::Timeout(d) if d == Duration::from_secs(10)));
        assert_eq!(err.kind(), crate::error::ErrorKind::AcquisitionFailed);
    }

    #[tokio::test]
    async fn test_source_failure_maps_to_acquisition_failed() {
        let geo = Geolocator::new(Some(Arc::new(DeniedSource)), PositionOptions::default());
        let err = geo.acquire().expect("supported").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::AcquisitionFailed);
    }

    #[tokio::test]
    async fn test_out_of_range_fix_rejected() {
        let geo = Geolocator::new(
            Some(Arc::new(FixedPosition(Coordinates::new(123.0, 0.0)))),
            PositionOptions::default(),
        );
        assert!(geo.acquire().expect("supported").await.is_err());
    }

    #[test]
    fn test_parse_loc() {
        assert_eq!(
            parse_loc("35.6895,139.6917").unwrap(),
            Coordinates::new(35.6895, 139.6917)
        );
        assert!(parse_loc("35.6895").is_err());
        assert!(parse_loc("north,139").is_err());
    }

    #[tokio::test]
    async fn test_ip_source_never_reuses_fix_with_zero_max_age() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ip": "203.0.113.9", "loc": "35.0,139.0"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let source = IpPosition::new(server.uri()).unwrap();
        let options = PositionOptions::default();
        assert_eq!(
            source.current_position(&options).await.unwrap(),
            Coordinates::new(35.0, 139.0)
        );
        source.current_position(&options).await.unwrap();
    }

    #[tokio::test]
    async fn test_ip_source_reuses_fresh_fix_when_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"loc": "1.5,2.5"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let source = IpPosition::new(server.uri()).unwrap();
        let options = PositionOptions {
            maximum_age: Duration::from_secs(600),
            ..Default::default()
        };
        source.current_position(&options).await.unwrap();
        let again = source.current_position(&options).await.unwrap();
        assert_eq!(again, Coordinates::new(1.5, 2.5));
    }

    #[tokio::test]
    async fn test_ip_source_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let source = IpPosition::new(server.uri()).unwrap();
        let err = source
            .current_position(&PositionOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_from_config_disabled_is_unsupported() {
        let config = GeolocationConfig {
            locator: LocatorConfig::Disabled,
            ..Default::default()
        };
        let geo = Geolocator::from_config(&config).unwrap();
        assert!(!geo.is_supported());
    }
}
