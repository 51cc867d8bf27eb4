//! Composite city profile model and per-provider payloads
//!
//! The profile is assembled per request and owned by the request that built
//! it. Every provider field is always present: a failed provider call swaps
//! the payload for an [`ErrorPlaceholder`], it never removes the key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates of a profiled city
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Stand-in value for a profile field whose provider call failed
///
/// Serializes as `{"error": message}`, the wire shape clients rely on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorPlaceholder {
    pub error: String,
}

impl ErrorPlaceholder {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Outcome of one provider call inside a composite profile
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldResult<T> {
    /// The provider delivered its payload
    Ready(T),
    /// The provider call failed; the field carries a placeholder instead
    Unavailable(ErrorPlaceholder),
}

impl<T> FieldResult<T> {
    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self::Unavailable(ErrorPlaceholder::new(message))
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, FieldResult::Ready(_))
    }

    #[must_use]
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            FieldResult::Ready(value) => Some(value),
            FieldResult::Unavailable(_) => None,
        }
    }
}

/// Current weather conditions at the city coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Human-readable conditions description
    pub description: String,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Provider icon code
    pub icon: String,
}

/// Coordinates of a point of interest
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

/// A nearby point of interest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    /// Average visitor rating, 0 when the provider has none
    pub rating: f64,
    /// Provider category tags
    pub types: Vec<String>,
    /// Short human-readable address
    pub vicinity: String,
    pub location: PlaceLocation,
    /// Reference to the first provider photo, if any
    pub photo_reference: Option<String>,
}

/// Encyclopedic summary of the city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LandmarkSummary {
    pub title: String,
    pub extract: String,
    pub thumbnail: Option<String>,
}

/// Accessibility estimate derived from map features around the city center
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessibilityReport {
    /// Number of wheelchair-accessible features found, absent for the
    /// neutral default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible_features_count: Option<u64>,
    /// Normalized score in 0.0..=1.0
    pub accessibility_score: f64,
    pub description: String,
}

/// Traffic status near the city center
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrafficReport {
    pub status: String,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

/// Narrative text for the city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityStory {
    pub story: String,
    pub audio_available: bool,
}

/// The composite city profile returned by one aggregate request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CityData {
    pub name: String,
    pub coordinates: Coordinates,
    pub weather: FieldResult<WeatherReport>,
    pub places: FieldResult<Vec<PointOfInterest>>,
    pub landmarks: FieldResult<LandmarkSummary>,
    pub accessibility: FieldResult<AccessibilityReport>,
    pub traffic: FieldResult<TrafficReport>,
    pub storytelling: FieldResult<CityStory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_placeholder_wire_shape() {
        let placeholder = ErrorPlaceholder::new("Weather data unavailable");
        let json = serde_json::to_value(&placeholder).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Weather data unavailable"})
        );
    }

    #[test]
    fn test_field_result_serializes_untagged() {
        let ready: FieldResult<CityStory> = FieldResult::Ready(CityStory {
            story: "Once upon a time".to_string(),
            audio_available: false,
        });
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["story"], "Once upon a time");
        assert!(json.get("Ready").is_none());

        let failed: FieldResult<CityStory> = FieldResult::failed("Story unavailable");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Story unavailable"}));
    }

    #[test]
    fn test_city_data_carries_all_profile_keys() {
        let profile = CityData {
            name: "Lyon".to_string(),
            coordinates: Coordinates {
                lat: 45.764,
                lng: 4.8357,
            },
            weather: FieldResult::failed("Weather data unavailable"),
            places: FieldResult::Ready(vec![]),
            landmarks: FieldResult::failed("Landmark data unavailable"),
            accessibility: FieldResult::failed("Accessibility data unavailable"),
            traffic: FieldResult::failed("Traffic data unavailable"),
            storytelling: FieldResult::failed("Story unavailable"),
        };

        let json = serde_json::to_value(&profile).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "name",
            "coordinates",
            "weather",
            "places",
            "landmarks",
            "accessibility",
            "traffic",
            "storytelling",
        ] {
            assert!(object.contains_key(key), "missing profile key {key}");
        }
        assert_eq!(object.len(), 8);
    }

    #[test]
    fn test_neutral_accessibility_report_omits_count() {
        let report = AccessibilityReport {
            accessible_features_count: None,
            accessibility_score: 0.5,
            description: "Accessibility information not available".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("accessible_features_count").is_none());
        assert_eq!(json["accessibility_score"], 0.5);
    }
}
