//! Provider adapters
//!
//! This module wraps every external data source behind a small capability
//! trait:
//! - Weather: current conditions (OpenWeatherMap)
//! - Places: nearby tourist attractions (Google Places)
//! - Landmark: encyclopedic city summary (Wikipedia)
//! - Accessibility: wheelchair-feature survey (Overpass)
//! - Traffic: static placeholder feed
//! - Story: curated narratives
//!
//! Adapters never raise past their own boundary: transport failures,
//! non-success statuses and malformed payloads all come back as a
//! [`ProviderError`] value for the aggregator to pattern-match on.

pub mod accessibility;
pub mod error;
pub mod landmark;
pub mod places;
pub mod story;
pub mod traffic;
pub mod weather;

use async_trait::async_trait;

use crate::models::{
    AccessibilityReport, CityStory, LandmarkSummary, PointOfInterest, TrafficReport, WeatherReport,
};

// Re-export commonly used types from submodules
pub use accessibility::OverpassClient;
pub use error::ProviderError;
pub use landmark::WikipediaClient;
pub use places::GooglePlacesClient;
pub use story::CuratedStories;
pub use traffic::StaticTrafficSource;
pub use weather::OpenWeatherClient;

/// Result type used by all provider adapters
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Current weather at a coordinate pair
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, lat: f64, lng: f64) -> Result<WeatherReport>;
}

/// Points of interest around a coordinate pair
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby_attractions(&self, lat: f64, lng: f64) -> Result<Vec<PointOfInterest>>;
}

/// Encyclopedic summary for a city name
#[async_trait]
pub trait LandmarkProvider: Send + Sync {
    async fn city_summary(&self, city_name: &str) -> Result<LandmarkSummary>;
}

/// Accessibility estimate around a coordinate pair
#[async_trait]
pub trait AccessibilityProvider: Send + Sync {
    async fn wheelchair_survey(&self, lat: f64, lng: f64) -> Result<AccessibilityReport>;
}

/// Traffic status around a coordinate pair
#[async_trait]
pub trait TrafficProvider: Send + Sync {
    async fn current_conditions(&self, lat: f64, lng: f64) -> Result<TrafficReport>;
}

/// Narrative text for a city name
#[async_trait]
pub trait StoryProvider: Send + Sync {
    async fn narrate(&self, city_name: &str) -> Result<CityStory>;
}
