use async_trait::async_trait;

use super::{Result, StoryProvider};
use crate::models::CityStory;

/// Hand-written narratives for cities with curated coverage
const CURATED_STORIES: &[(&str, &str)] = &[
    (
        "Paris",
        "Paris, the City of Light, has been a center of art, fashion, and culture for centuries. From the medieval Notre-Dame to the iconic Eiffel Tower, every street tells a story of romance and revolution.",
    ),
    (
        "London",
        "London, a city where ancient history meets modern innovation. From the Tower of London's medieval walls to the gleaming skyscrapers of Canary Wharf, London has been shaping world history for over 2000 years.",
    ),
    (
        "Tokyo",
        "Tokyo, where tradition and technology dance in perfect harmony. From ancient temples to neon-lit streets, this metropolis represents the fascinating blend of old Japan and cutting-edge modernity.",
    ),
    (
        "New York",
        "New York City, the city that never sleeps. From the Statue of Liberty welcoming immigrants to the towering skyscrapers of Manhattan, NYC embodies the American dream and endless possibilities.",
    ),
];

/// Curated story table with a templated fallback for uncovered cities
pub struct CuratedStories;

#[async_trait]
impl StoryProvider for CuratedStories {
    async fn narrate(&self, city_name: &str) -> Result<CityStory> {
        let story = CURATED_STORIES
            .iter()
            .find(|(name, _)| *name == city_name)
            .map_or_else(
                || {
                    format!(
                        "Discover the unique charm and rich heritage of {city_name}, a city with countless stories waiting to be explored."
                    )
                },
                |(_, story)| (*story).to_string(),
            );

        Ok(CityStory {
            story,
            // No audio synthesis wired in
            audio_available: false,
        })
    }
}
