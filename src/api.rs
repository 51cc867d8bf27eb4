//! Gateway request handlers
//!
//! Maps the inbound HTTP surface onto the aggregator, the directory and
//! the directions collaborators. Failures surface as `{"error": message}`
//! bodies: 400 for request validation, 500 for upstream trouble.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::CityScopeError;
use crate::aggregator::CityProfileService;
use crate::directions::{DirectionsClient, DirectionsRequest, StreetViewBuilder};
use crate::directory::GeoDirectory;
use crate::models::{CityData, CityEntry, CountryEntry};

/// Shared state behind every gateway route
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<GeoDirectory>,
    pub profiles: Arc<CityProfileService>,
    pub directions: Arc<DirectionsClient>,
    pub street_view: Arc<StreetViewBuilder>,
}

/// Error response emitted by the gateway
#[derive(Debug)]
pub enum GatewayError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GatewayError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            GatewayError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<CityScopeError> for GatewayError {
    fn from(err: CityScopeError) -> Self {
        match err {
            CityScopeError::Validation { message } => Self::BadRequest(message),
            CityScopeError::Config { message } | CityScopeError::Upstream { message } => {
                Self::Internal(message)
            }
            other => Self::Internal(other.user_message()),
        }
    }
}

/// Optional coordinate query parameters
#[derive(Debug, Deserialize)]
struct CoordsQuery {
    lat: Option<f64>,
    lng: Option<f64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/countries", get(get_countries))
        .route("/cities/{country_code}", get(get_cities))
        .route("/city-data/{city_name}", get(get_city_data))
        .route("/directions", post(post_directions))
        .route("/street-view", get(get_street_view))
        .with_state(state)
}

async fn get_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryEntry>>, GatewayError> {
    let countries = state.directory.countries().await?;
    Ok(Json(countries))
}

async fn get_cities(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<Vec<CityEntry>>, GatewayError> {
    let cities = state.directory.cities(&country_code).await?;
    Ok(Json(cities))
}

async fn get_city_data(
    State(state): State<AppState>,
    Path(city_name): Path<String>,
    Query(params): Query<CoordsQuery>,
) -> Result<Json<CityData>, GatewayError> {
    let profile = state
        .profiles
        .city_profile(&city_name, params.lat, params.lng)
        .await?;
    Ok(Json(profile))
}

async fn post_directions(
    State(state): State<AppState>,
    Json(request): Json<DirectionsRequest>,
) -> Result<Json<Value>, GatewayError> {
    let payload = state.directions.route(&request).await?;
    Ok(Json(payload))
}

async fn get_street_view(
    State(state): State<AppState>,
    Query(params): Query<CoordsQuery>,
) -> Result<Json<Value>, GatewayError> {
    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(GatewayError::BadRequest(
            "Invalid parameters or API key not configured".to_string(),
        ));
    };

    match state.street_view.url(lat, lng) {
        Ok(url) => Ok(Json(json!({ "street_view_url": url }))),
        // A missing credential reads the same as missing parameters on
        // this route.
        Err(_) => Err(GatewayError::BadRequest(
            "Invalid parameters or API key not configured".to_string(),
        )),
    }
}
