//! City profile aggregation
//!
//! `CityProfileService` composes the six provider adapters into one
//! composite profile per request. All six calls are issued concurrently and
//! joined; each call carries its own timeout and an error or timeout only
//! swaps that field for a placeholder, it never aborts the other five.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::CityScopeError;
use crate::models::{CityData, Coordinates, FieldResult};
use crate::providers::{
    AccessibilityProvider, LandmarkProvider, PlacesProvider, ProviderError, StoryProvider,
    TrafficProvider, WeatherProvider,
};

/// Aggregates the six provider adapters into city profiles
pub struct CityProfileService {
    weather: Arc<dyn WeatherProvider>,
    places: Arc<dyn PlacesProvider>,
    landmarks: Arc<dyn LandmarkProvider>,
    accessibility: Arc<dyn AccessibilityProvider>,
    traffic: Arc<dyn TrafficProvider>,
    stories: Arc<dyn StoryProvider>,
    call_timeout: Duration,
}

impl CityProfileService {
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        places: Arc<dyn PlacesProvider>,
        landmarks: Arc<dyn LandmarkProvider>,
        accessibility: Arc<dyn AccessibilityProvider>,
        traffic: Arc<dyn TrafficProvider>,
        stories: Arc<dyn StoryProvider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            weather,
            places,
            landmarks,
            accessibility,
            traffic,
            stories,
            call_timeout,
        }
    }

    /// Build the composite profile for one city.
    ///
    /// Missing or non-finite coordinates fail the whole request without a
    /// single provider call; any provider-level failure degrades only its
    /// own field.
    #[tracing::instrument(skip(self))]
    pub async fn city_profile(
        &self,
        name: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<CityData, CityScopeError> {
        let (Some(lat), Some(lng)) = (lat, lng) else {
            return Err(CityScopeError::validation("Latitude and longitude required"));
        };
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CityScopeError::validation("Latitude and longitude required"));
        }

        debug!("Aggregating profile for {name} at {lat:.4}, {lng:.4}");

        let (weather, places, landmarks, accessibility, traffic, storytelling) = futures::join!(
            self.guard("weather", self.weather.current_weather(lat, lng)),
            self.guard("places", self.places.nearby_attractions(lat, lng)),
            self.guard("landmarks", self.landmarks.city_summary(name)),
            self.guard("accessibility", self.accessibility.wheelchair_survey(lat, lng)),
            self.guard("traffic", self.traffic.current_conditions(lat, lng)),
            self.guard("storytelling", self.stories.narrate(name)),
        );

        Ok(CityData {
            name: name.to_string(),
            coordinates: Coordinates { lat, lng },
            weather,
            places,
            landmarks,
            accessibility,
            traffic,
            storytelling,
        })
    }

    /// Bound one provider call by the configured timeout and convert any
    /// failure into the field's placeholder value.
    async fn guard<T>(
        &self,
        field: &'static str,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> FieldResult<T> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(payload)) => FieldResult::Ready(payload),
            Ok(Err(e)) => {
                warn!("Provider call for {field} failed: {e}");
                FieldResult::failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    "Provider call for {field} timed out after {:?}",
                    self.call_timeout
                );
                FieldResult::failed(format!("{field} request timed out"))
            }
        }
    }
}
