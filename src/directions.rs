//! Directions passthrough and street-view URL building
//!
//! The directions endpoint is a pure request reshaping in front of the
//! routing provider: the provider's payload is returned verbatim. The
//! street-view builder is pure string construction with no network call.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::CityScopeError;
use crate::models::Coordinates;

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const STREET_VIEW_URL: &str = "https://maps.googleapis.com/maps/api/streetview";

/// Travel mode used when the request does not name one
fn default_mode() -> String {
    "driving".to_string()
}

/// Inbound directions request body
#[derive(Debug, Deserialize)]
pub struct DirectionsRequest {
    pub origin: Option<Coordinates>,
    pub destination: Option<Coordinates>,
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// Routing provider client
pub struct DirectionsClient {
    http: Client,
    api_key: Option<String>,
}

impl DirectionsClient {
    #[must_use]
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    /// Forward a directions request and hand back the raw routing payload.
    #[tracing::instrument(skip(self, request))]
    pub async fn route(&self, request: &DirectionsRequest) -> Result<Value, CityScopeError> {
        let (Some(origin), Some(destination)) = (request.origin, request.destination) else {
            return Err(CityScopeError::validation("Origin and destination required"));
        };

        let Some(api_key) = &self.api_key else {
            return Err(CityScopeError::config("Google Maps API key not configured"));
        };

        let response = self
            .http
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", format!("{},{}", origin.lat, origin.lng)),
                (
                    "destination",
                    format!("{},{}", destination.lat, destination.lng),
                ),
                ("mode", request.mode.clone()),
                ("key", api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Directions request failed: {e}");
                CityScopeError::upstream("Failed to get directions")
            })?;

        if !response.status().is_success() {
            warn!("Directions API returned status {}", response.status());
            return Err(CityScopeError::upstream("Failed to get directions"));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse directions response: {e}");
            CityScopeError::upstream("Failed to get directions")
        })
    }
}

/// Street-view static imagery URL builder
pub struct StreetViewBuilder {
    api_key: Option<String>,
}

impl StreetViewBuilder {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Build the imagery URL for a coordinate pair.
    pub fn url(&self, lat: f64, lng: f64) -> Result<String, CityScopeError> {
        let Some(api_key) = &self.api_key else {
            return Err(CityScopeError::config("Google Maps API key not configured"));
        };

        Ok(format!(
            "{STREET_VIEW_URL}?size=640x640&location={lat},{lng}&key={api_key}"
        ))
    }
}
