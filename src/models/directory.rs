//! Directory models for country and city lookups

use serde::{Deserialize, Serialize};

/// One entry in the country directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryEntry {
    /// ISO 3166-1 alpha-2 country code
    pub code: String,
    /// Common country name
    pub name: String,
    /// Flag emoji
    pub flag: String,
}

/// One entry in a per-country city list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityEntry {
    /// City name
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Population count, 0 when the directory has none
    pub population: u64,
    /// First-level administrative division the city belongs to
    pub admin_name: String,
}
