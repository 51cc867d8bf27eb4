//! `CityScope` - City profile aggregation service
//!
//! This library provides the core functionality for aggregating city
//! profiles from independent data providers, the memoized country/city
//! directory, and the HTTP gateway in front of both.

pub mod aggregator;
pub mod api;
pub mod cache;
pub mod config;
pub mod directions;
pub mod directory;
pub mod error;
pub mod models;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use aggregator::CityProfileService;
pub use cache::SingleFlight;
pub use config::CityScopeConfig;
pub use directions::{DirectionsClient, DirectionsRequest, StreetViewBuilder};
pub use directory::GeoDirectory;
pub use error::CityScopeError;
pub use models::{CityData, CityEntry, CountryEntry, FieldResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CityScopeError>;
