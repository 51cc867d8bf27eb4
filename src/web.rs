use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::CityScopeConfig;

pub async fn run(config: &CityScopeConfig, state: AppState) -> Result<()> {
    let cors = cors_layer(&config.server.cors_origins)?;

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.timeout_seconds.into(),
        )))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "CityScope gateway running at http://localhost:{}",
        config.server.port
    );
    axum::serve(listener, app)
        .await
        .context("Gateway server failed")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|origin| origin == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        let origins = vec![
            "http://localhost:5173".to_string(),
            "https://cityscope.example".to_string(),
        ];
        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let origins = vec!["not a header value\n".to_string()];
        assert!(cors_layer(&origins).is_err());
    }
}
