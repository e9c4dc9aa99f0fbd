//! Nominatim reverse-geocoding client
//!
//! Nominatim rejects anonymous clients, so every request carries the
//! configured User-Agent.

use std::time::Duration;

use serde::Deserialize;

use super::{build_http_client, get_json};
use crate::config::GeocodeApiConfig;
use crate::error::ApiError;
use crate::model::{AddressResult, Coordinates};

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl From<NominatimAddress> for AddressResult {
    fn from(addr: NominatimAddress) -> Self {
        AddressResult {
            country: addr.country,
            region: addr.state,
            locality: AddressResult::pick_locality(addr.city, addr.town, addr.village),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReverseGeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReverseGeocodeClient {
    pub fn new(config: &GeocodeApiConfig, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            http: build_http_client(Some(&config.user_agent), timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve coordinates to country / region / locality
    pub async fn fetch_address(&self, coords: Coordinates) -> Result<AddressResult, ApiError> {
        let url = format!("{}/reverse", self.base_url);
        tracing::debug!(%url, lat = coords.latitude, lon = coords.longitude, "fetching address");

        let request = self.http.get(&url).query(&[
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("format", "json".to_string()),
        ]);
        let response: ReverseResponse = get_json(request).await?;
        let address = response.address.ok_or(ApiError::MissingField("address"))?;
        Ok(address.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ReverseGeocodeClient {
        let config = GeocodeApiConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        ReverseGeocodeClient::new(&config, None).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_address_prefers_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "35"))
            .and(query_param("lon", "139"))
            .and(query_param("format", "json"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "somewhere",
                "address": {
                    "country": "日本",
                    "state": "神奈川県",
                    "city": "相模原市",
                    "town": "藤野"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let address = client_for(&server)
            .fetch_address(Coordinates::new(35.0, 139.0))
            .await
            .unwrap();

        assert_eq!(address.country.as_deref(), Some("日本"));
        assert_eq!(address.region.as_deref(), Some("神奈川県"));
        assert_eq!(address.locality, "相模原市");
    }

    #[tokio::test]
    async fn test_fetch_address_without_locality() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": {"country": "Antarctica"}
            })))
            .mount(&server)
            .await;

        let address = client_for(&server)
            .fetch_address(Coordinates::new(-80.0, 0.0))
            .await
            .unwrap();

        assert_eq!(address.country.as_deref(), Some("Antarctica"));
        assert_eq!(address.region, None);
        assert_eq!(address.locality, "unknown");
    }

    #[tokio::test]
    async fn test_missing_address_block() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "Unable to geocode"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_address(Coordinates::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField("address")));
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_address(Coordinates::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 503));
    }
}
