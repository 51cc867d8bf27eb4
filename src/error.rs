//! Error types and handling for the `CityScope` service

use thiserror::Error;

/// Main error type for the `CityScope` application
#[derive(Error, Debug)]
pub enum CityScopeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider communication errors
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Request validation errors
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl CityScopeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CityScopeError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            CityScopeError::Upstream { .. } => {
                "Unable to reach an upstream data provider. Please try again later.".to_string()
            }
            CityScopeError::Validation { message } => {
                format!("Invalid request: {message}")
            }
            CityScopeError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CityScopeError::General { message } => message.clone(),
        }
    }
}
