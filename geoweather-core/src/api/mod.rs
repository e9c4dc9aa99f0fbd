//! HTTP clients for the weather and reverse-geocoding services
//!
//! Each client issues exactly one GET per call. There is no retry and no
//! caching: a failure is returned to the caller as-is.

pub mod geocode;
pub mod weather;

pub use geocode::ReverseGeocodeClient;
pub use weather::{icon_url, WeatherClient};

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

fn build_http_client(
    user_agent: Option<&str>,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent);
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Send the request and decode a JSON body, treating non-2xx as an error
async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
