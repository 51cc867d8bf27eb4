use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{PlacesProvider, ProviderError, Result};
use crate::models::{PlaceLocation, PointOfInterest};

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Search radius around the city center, in meters
const SEARCH_RADIUS: u32 = 5000;

/// Maximum number of points of interest returned per profile
const MAX_PLACES: usize = 20;

/// Google Places nearby-search client, restricted to tourist attractions
pub struct GooglePlacesClient {
    http: Client,
    api_key: Option<String>,
}

impl GooglePlacesClient {
    #[must_use]
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    #[tracing::instrument(skip(self))]
    async fn nearby_attractions(&self, lat: f64, lng: f64) -> Result<Vec<PointOfInterest>> {
        let Some(api_key) = &self.api_key else {
            return Err(ProviderError::configuration(
                "Google Maps API key not configured",
            ));
        };

        let response = self
            .http
            .get(NEARBY_SEARCH_URL)
            .query(&[
                ("location", format!("{lat},{lng}")),
                ("radius", SEARCH_RADIUS.to_string()),
                ("type", "tourist_attraction".to_string()),
                ("key", api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("Places request failed: {e}");
                ProviderError::upstream("Places data unavailable")
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Places API returned status {status}");
            return Err(ProviderError::upstream("Places data unavailable"));
        }

        let payload: NearbySearchResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Places response: {e}");
            ProviderError::upstream("Places data unavailable")
        })?;

        // The Places API reports request-level failures in-band with a 200.
        if payload.status != "OK" && payload.status != "ZERO_RESULTS" {
            warn!("Places API returned in-band status {}", payload.status);
            return Err(ProviderError::upstream("Places data unavailable"));
        }

        let places = into_points(payload);
        debug!("Found {} attractions near {lat:.4}, {lng:.4}", places.len());
        Ok(places)
    }
}

fn into_points(payload: NearbySearchResponse) -> Vec<PointOfInterest> {
    payload
        .results
        .into_iter()
        .take(MAX_PLACES)
        .map(|place| {
            let photo_reference = place
                .photos
                .unwrap_or_default()
                .into_iter()
                .next()
                .map(|photo| photo.photo_reference);

            PointOfInterest {
                name: place.name,
                rating: place.rating.unwrap_or(0.0),
                types: place.types.unwrap_or_default(),
                vicinity: place.vicinity.unwrap_or_default(),
                location: PlaceLocation {
                    lat: place.geometry.location.lat,
                    lng: place.geometry.location.lng,
                },
                photo_reference,
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    rating: Option<f64>,
    types: Option<Vec<String>>,
    vicinity: Option<String>,
    geometry: PlaceGeometry,
    photos: Option<Vec<PlacePhoto>>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: WireLocation,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PlacePhoto {
    photo_reference: String,
}
