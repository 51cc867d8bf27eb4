//! Configuration management for the `CityScope` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CityScopeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `CityScope` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CityScopeConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream provider credentials and accounts
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the gateway listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by the CORS layer
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Upstream provider credentials
///
/// Every credential is optional. A missing credential degrades only the
/// affected field or operation, never the whole process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenWeatherMap API key (weather field)
    pub openweather_api_key: Option<String>,
    /// Google Maps API key (places field, directions, street view)
    pub google_maps_api_key: Option<String>,
    /// GeoNames account name (city directory)
    #[serde(default = "default_geonames_username")]
    pub geonames_username: String,
}

/// Outbound HTTP client configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout for the shared HTTP client in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    /// Per-provider call budget inside an aggregate request, in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_geonames_username() -> String {
    "demo".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_provider_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            google_maps_api_key: None,
            geonames_username: default_geonames_username(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            provider_timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CityScopeConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with CITYSCOPE_ prefix,
        // e.g. CITYSCOPE_PROVIDERS__OPENWEATHER_API_KEY
        builder = builder.add_source(
            Environment::with_prefix("CITYSCOPE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CityScopeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate provider credentials
    ///
    /// Credentials are optional, but an empty string almost certainly means
    /// a broken deployment rather than an intentional opt-out.
    pub fn validate_credentials(&self) -> Result<()> {
        if let Some(key) = &self.providers.openweather_api_key
            && key.is_empty()
        {
            return Err(CityScopeError::config(
                "OpenWeatherMap API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into());
        }

        if let Some(key) = &self.providers.google_maps_api_key
            && key.is_empty()
        {
            return Err(CityScopeError::config(
                "Google Maps API key cannot be empty if provided. Either remove it or provide a valid key.",
            )
            .into());
        }

        if self.providers.geonames_username.is_empty() {
            return Err(CityScopeError::config("GeoNames username cannot be empty").into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(
                CityScopeError::config("HTTP client timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.http.provider_timeout_seconds == 0
            || self.http.provider_timeout_seconds > self.http.timeout_seconds
        {
            return Err(CityScopeError::config(
                "Provider call timeout must be at least 1 second and no larger than the HTTP client timeout",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CityScopeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if self.server.cors_origins.is_empty() {
            return Err(CityScopeError::config(
                "CORS origins cannot be empty. Use [\"*\"] to allow any origin.",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CityScopeConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.providers.geonames_username, "demo");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.provider_timeout_seconds, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.providers.openweather_api_key.is_none());
        assert!(config.providers.google_maps_api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CityScopeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_api_key() {
        let mut config = CityScopeConfig::default();
        config.providers.openweather_api_key = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = CityScopeConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid log level")
        );
    }

    #[test]
    fn test_validation_numeric_ranges() {
        let mut config = CityScopeConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("between 1 and 300")
        );
    }

    #[test]
    fn test_validation_provider_timeout_exceeds_client_timeout() {
        let mut config = CityScopeConfig::default();
        config.http.provider_timeout_seconds = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_cors_origins() {
        let mut config = CityScopeConfig::default();
        config.server.cors_origins.clear();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("CORS origins"));
    }

    #[test]
    fn test_load_without_config_file() {
        let config = CityScopeConfig::load_from_path(Some(PathBuf::from(
            "definitely-not-a-real-config.toml",
        )));
        assert!(config.is_ok());
    }
}
