use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AccessibilityProvider, Result};
use crate::models::AccessibilityReport;

const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Survey radius around the city center, in meters
const SURVEY_RADIUS: u32 = 1000;

/// Overpass API client counting wheelchair-accessible map features
///
/// Shares the Landmark adapter's defaulted-not-failed policy: an upstream
/// failure yields the fixed neutral report, never an error placeholder.
pub struct OverpassClient {
    http: Client,
}

impl OverpassClient {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn count_features(&self, lat: f64, lng: f64) -> Option<u64> {
        let query = format!(
            "[out:json][timeout:25];\
             (way[\"wheelchair\"=\"yes\"](around:{SURVEY_RADIUS},{lat},{lng});\
             node[\"wheelchair\"=\"yes\"](around:{SURVEY_RADIUS},{lat},{lng}););\
             out geom;"
        );

        let response = match self.http.post(OVERPASS_URL).body(query).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Overpass returned status {}", response.status());
                return None;
            }
            Err(e) => {
                warn!("Overpass request failed: {e}");
                return None;
            }
        };

        match response.json::<OverpassResponse>().await {
            Ok(payload) => Some(payload.elements.len() as u64),
            Err(e) => {
                warn!("Failed to parse Overpass response: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl AccessibilityProvider for OverpassClient {
    #[tracing::instrument(skip(self))]
    async fn wheelchair_survey(&self, lat: f64, lng: f64) -> Result<AccessibilityReport> {
        match self.count_features(lat, lng).await {
            Some(count) => {
                debug!("Found {count} accessible features near {lat:.4}, {lng:.4}");
                Ok(survey_report(count))
            }
            None => Ok(neutral_report()),
        }
    }
}

/// Normalize a feature count to a 0.0..=1.0 score, saturating at ten
/// features.
fn accessibility_score(count: u64) -> f64 {
    (count as f64 / 10.0).min(1.0)
}

fn survey_report(count: u64) -> AccessibilityReport {
    AccessibilityReport {
        accessible_features_count: Some(count),
        accessibility_score: accessibility_score(count),
        description: format!("Found {count} wheelchair-accessible features nearby"),
    }
}

fn neutral_report() -> AccessibilityReport {
    AccessibilityReport {
        accessible_features_count: None,
        accessibility_score: 0.5,
        description: "Accessibility information not available".to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0.0)]
    #[case(3, 0.3)]
    #[case(10, 1.0)]
    #[case(25, 1.0)]
    fn test_accessibility_score(#[case] count: u64, #[case] expected: f64) {
        assert!((accessibility_score(count) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_survey_report_embeds_count() {
        let report = survey_report(3);
        assert_eq!(report.accessible_features_count, Some(3));
        assert_eq!(report.accessibility_score, 0.3);
        assert_eq!(
            report.description,
            "Found 3 wheelchair-accessible features nearby"
        );
    }

    #[test]
    fn test_neutral_report_shape() {
        let report = neutral_report();
        assert_eq!(report.accessible_features_count, None);
        assert_eq!(report.accessibility_score, 0.5);
        assert_eq!(report.description, "Accessibility information not available");
    }

    #[test]
    fn test_overpass_wire_payload_parses() {
        let payload: OverpassResponse = serde_json::from_value(serde_json::json!({
            "version": 0.6,
            "elements": [{"type": "node", "id": 1}, {"type": "way", "id": 2}]
        }))
        .unwrap();
        assert_eq!(payload.elements.len(), 2);
    }
}
