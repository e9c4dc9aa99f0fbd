//! OpenWeatherMap current-weather client

use std::time::Duration;

use serde::Deserialize;

use super::{build_http_client, get_json};
use crate::config::WeatherApiConfig;
use crate::error::ApiError;
use crate::model::{ConditionCategory, Coordinates, WeatherResult};

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

impl WeatherResponse {
    fn into_result(self) -> Result<WeatherResult, ApiError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(ApiError::MissingField("weather[0]"))?;
        Ok(WeatherResult {
            condition: ConditionCategory::parse(&condition.main),
            description: condition.description,
            temperature_celsius: self.main.temp,
            icon_id: condition.icon,
        })
    }
}

/// URL of the 2x icon image for a condition icon id
pub fn icon_url(icon_base_url: &str, icon_id: &str) -> String {
    format!(
        "{}/img/wn/{}@2x.png",
        icon_base_url.trim_end_matches('/'),
        icon_id
    )
}

#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherApiConfig, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            http: build_http_client(None, timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Fetch current conditions in metric units
    pub async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherResult, ApiError> {
        let url = format!("{}/weather", self.base_url);
        tracing::debug!(%url, lat = coords.latitude, lon = coords.longitude, "fetching weather");

        let request = self.http.get(&url).query(&[
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
            ("lang", self.lang.clone()),
        ]);
        let response: WeatherResponse = get_json(request).await?;
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherClient {
        let config = WeatherApiConfig {
            base_url: server.uri(),
            api_key: "test-key".into(),
            ..Default::default()
        };
        WeatherClient::new(&config, None).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_weather_rain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "35"))
            .and(query_param("lon", "139"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "ja"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}],
                "main": {"temp": 18.2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let weather = client_for(&server)
            .fetch_weather(Coordinates::new(35.0, 139.0))
            .await
            .unwrap();

        assert_eq!(weather.condition, ConditionCategory::Rain);
        assert_eq!(weather.description, "light rain");
        assert_eq!(weather.temperature_celsius, 18.2);
        assert_eq!(weather.icon_id, "10d");
    }

    #[tokio::test]
    async fn test_unauthorized_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 401));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_condition_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": [],
                "main": {"temp": 3.0}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_weather(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField("weather[0]")));
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("https://openweathermap.org/", "10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }
}
