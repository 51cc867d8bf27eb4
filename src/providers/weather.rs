use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ProviderError, Result, WeatherProvider};
use crate::models::WeatherReport;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap current-weather client
///
/// The credential is optional at construction; its absence is reported as a
/// configuration failure on first use rather than a process-start failure.
pub struct OpenWeatherClient {
    http: Client,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[tracing::instrument(skip(self))]
    async fn current_weather(&self, lat: f64, lng: f64) -> Result<WeatherReport> {
        let Some(api_key) = &self.api_key else {
            return Err(ProviderError::configuration("Weather API key not configured"));
        };

        let response = self
            .http
            .get(OPENWEATHER_URL)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("appid", api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("OpenWeatherMap request failed: {e}");
                ProviderError::upstream("Weather data unavailable")
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("OpenWeatherMap returned status {status}");
            return Err(ProviderError::upstream("Weather data unavailable"));
        }

        let payload: OwCurrentResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse OpenWeatherMap response: {e}");
            ProviderError::upstream("Weather data unavailable")
        })?;

        debug!("Retrieved current weather for {lat:.4}, {lng:.4}");
        into_report(payload)
    }
}

fn into_report(payload: OwCurrentResponse) -> Result<WeatherReport> {
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::upstream("Weather data unavailable"))?;

    Ok(WeatherReport {
        temperature: payload.main.temp,
        description: condition.description,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
        icon: condition.icon,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}
