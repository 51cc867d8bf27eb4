use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cityscope::api::AppState;
use cityscope::providers::{
    CuratedStories, GooglePlacesClient, OpenWeatherClient, OverpassClient, StaticTrafficSource,
    WikipediaClient,
};
use cityscope::{
    CityProfileService, CityScopeConfig, DirectionsClient, GeoDirectory, StreetViewBuilder, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CityScopeConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http.timeout_seconds.into()))
        .user_agent(concat!("cityscope/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let providers = &config.providers;
    let state = AppState {
        directory: Arc::new(GeoDirectory::new(
            http.clone(),
            providers.geonames_username.clone(),
        )),
        profiles: Arc::new(CityProfileService::new(
            Arc::new(OpenWeatherClient::new(
                http.clone(),
                providers.openweather_api_key.clone(),
            )),
            Arc::new(GooglePlacesClient::new(
                http.clone(),
                providers.google_maps_api_key.clone(),
            )),
            Arc::new(WikipediaClient::new(http.clone())),
            Arc::new(OverpassClient::new(http.clone())),
            Arc::new(StaticTrafficSource),
            Arc::new(CuratedStories),
            Duration::from_secs(config.http.provider_timeout_seconds.into()),
        )),
        directions: Arc::new(DirectionsClient::new(
            http.clone(),
            providers.google_maps_api_key.clone(),
        )),
        street_view: Arc::new(StreetViewBuilder::new(
            providers.google_maps_api_key.clone(),
        )),
    };

    web::run(&config, state).await
}
