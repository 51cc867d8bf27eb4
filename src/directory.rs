//! Country and city directory
//!
//! Wraps the RestCountries and GeoNames directory services behind two
//! lazily-populated lookup tables. Both tables live for the whole process:
//! the country list is fetched once, city lists once per country code, and
//! concurrent first requests share a single upstream call through
//! [`SingleFlight`]. A failed population is not cached; the next request
//! retries.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::CityScopeError;
use crate::cache::SingleFlight;
use crate::models::{CityEntry, CountryEntry};

const RESTCOUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca2,flag";
const GEONAMES_URL: &str = "http://api.geonames.org/searchJSON";

/// Row cap requested from the GeoNames directory
const GEONAMES_MAX_ROWS: u32 = 50;

/// Cities below this population are dropped from the list
const MIN_POPULATION: u64 = 10_000;

/// Maximum number of cities kept per country
const CITY_LIST_LIMIT: usize = 30;

/// Directory of countries and their largest cities
pub struct GeoDirectory {
    http: Client,
    geonames_username: String,
    countries: SingleFlight<(), Vec<CountryEntry>>,
    cities: SingleFlight<String, Vec<CityEntry>>,
}

impl GeoDirectory {
    #[must_use]
    pub fn new(http: Client, geonames_username: String) -> Self {
        Self {
            http,
            geonames_username,
            countries: SingleFlight::new(),
            cities: SingleFlight::new(),
        }
    }

    /// All countries, sorted by name, unique by code
    pub async fn countries(&self) -> Result<Vec<CountryEntry>, CityScopeError> {
        self.countries
            .get_or_populate((), || self.fetch_countries())
            .await
    }

    /// The largest cities of one country, sorted by population descending
    pub async fn cities(&self, country_code: &str) -> Result<Vec<CityEntry>, CityScopeError> {
        self.cities
            .get_or_populate(country_code.to_string(), || {
                self.fetch_cities(country_code)
            })
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_countries(&self) -> Result<Vec<CountryEntry>, CityScopeError> {
        let response = self
            .http
            .get(RESTCOUNTRIES_URL)
            .send()
            .await
            .map_err(|e| {
                warn!("RestCountries request failed: {e}");
                CityScopeError::upstream("Failed to fetch countries")
            })?;

        if !response.status().is_success() {
            warn!("RestCountries returned status {}", response.status());
            return Err(CityScopeError::upstream("Failed to fetch countries"));
        }

        let payload: Vec<WireCountry> = response.json().await.map_err(|e| {
            warn!("Failed to parse RestCountries response: {e}");
            CityScopeError::upstream("Failed to fetch countries")
        })?;

        let countries = shape_countries(payload);
        debug!("Populated country directory with {} entries", countries.len());
        Ok(countries)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_cities(&self, country_code: &str) -> Result<Vec<CityEntry>, CityScopeError> {
        let response = self
            .http
            .get(GEONAMES_URL)
            .query(&[
                ("country", country_code.to_string()),
                // Populated places only
                ("featureClass", "P".to_string()),
                ("maxRows", GEONAMES_MAX_ROWS.to_string()),
                ("orderby", "population".to_string()),
                ("username", self.geonames_username.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!("GeoNames request failed: {e}");
                CityScopeError::upstream("Failed to fetch cities")
            })?;

        if !response.status().is_success() {
            warn!("GeoNames returned status {}", response.status());
            return Err(CityScopeError::upstream("Failed to fetch cities"));
        }

        let payload: GeoNamesResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse GeoNames response: {e}");
            CityScopeError::upstream("Failed to fetch cities")
        })?;

        let cities = shape_cities(payload.geonames);
        debug!(
            "Populated city list for {country_code} with {} entries",
            cities.len()
        );
        Ok(cities)
    }
}

fn shape_countries(payload: Vec<WireCountry>) -> Vec<CountryEntry> {
    let mut countries: Vec<CountryEntry> = payload
        .into_iter()
        .map(|country| CountryEntry {
            code: country.cca2,
            name: country.name.common,
            flag: country.flag.unwrap_or_else(|| "\u{1f3f3}\u{fe0f}".to_string()),
        })
        .collect();

    countries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut seen = std::collections::HashSet::new();
    countries.retain(|country| seen.insert(country.code.clone()));
    countries
}

fn shape_cities(payload: Vec<WireCity>) -> Vec<CityEntry> {
    let mut cities: Vec<CityEntry> = payload
        .into_iter()
        .filter_map(|city| {
            // GeoNames serves coordinates as strings; a row with
            // unparsable coordinates is dropped rather than failing the
            // whole list.
            let lat = city.lat.parse().ok()?;
            let lng = city.lng.parse().ok()?;
            Some(CityEntry {
                name: city.name,
                lat,
                lng,
                population: city.population,
                admin_name: city.admin_name,
            })
        })
        .filter(|city| city.population > MIN_POPULATION)
        .collect();

    cities.sort_by(|a, b| b.population.cmp(&a.population));
    cities.truncate(CITY_LIST_LIMIT);
    cities
}

#[derive(Debug, Deserialize)]
struct WireCountry {
    name: WireCountryName,
    cca2: String,
    flag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCountryName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct GeoNamesResponse {
    #[serde(default)]
    geonames: Vec<WireCity>,
}

#[derive(Debug, Deserialize)]
struct WireCity {
    name: String,
    lat: String,
    lng: String,
    #[serde(default)]
    population: u64,
    #[serde(default, rename = "adminName1")]
    admin_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_city(name: &str, population: u64) -> WireCity {
        WireCity {
            name: name.to_string(),
            lat: "48.85341".to_string(),
            lng: "2.3488".to_string(),
            population,
            admin_name: "Île-de-France".to_string(),
        }
    }

    #[test]
    fn test_shape_countries_sorts_and_dedups() {
        let payload = vec![
            WireCountry {
                name: WireCountryName {
                    common: "Germany".to_string(),
                },
                cca2: "DE".to_string(),
                flag: Some("\u{1f1e9}\u{1f1ea}".to_string()),
            },
            WireCountry {
                name: WireCountryName {
                    common: "Austria".to_string(),
                },
                cca2: "AT".to_string(),
                flag: None,
            },
            WireCountry {
                name: WireCountryName {
                    common: "Germany (duplicate)".to_string(),
                },
                cca2: "DE".to_string(),
                flag: None,
            },
        ];

        let countries = shape_countries(payload);
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].code, "AT");
        assert_eq!(countries[0].flag, "\u{1f3f3}\u{fe0f}");
        assert_eq!(countries[1].code, "DE");

        let mut names: Vec<_> = countries.iter().map(|c| c.name.clone()).collect();
        let sorted = names.clone();
        names.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_shape_cities_filters_sorts_and_truncates() {
        let mut payload: Vec<WireCity> = (0u64..40)
            .map(|i| wire_city(&format!("City {i}"), 20_000 + u64::from(i) * 1_000))
            .collect();
        payload.push(wire_city("Hamlet", 500));
        payload.push(wire_city("Village", 10_000));

        let cities = shape_cities(payload);

        assert_eq!(cities.len(), CITY_LIST_LIMIT);
        assert!(cities.iter().all(|city| city.population > MIN_POPULATION));
        assert!(
            cities
                .windows(2)
                .all(|pair| pair[0].population >= pair[1].population)
        );
    }

    #[test]
    fn test_shape_cities_drops_unparsable_coordinates() {
        let mut bad = wire_city("Atlantis", 50_000);
        bad.lat = "not-a-number".to_string();
        let cities = shape_cities(vec![bad, wire_city("Paris", 2_000_000)]);

        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Paris");
    }

    #[test]
    fn test_geonames_wire_payload_parses() {
        let payload: GeoNamesResponse = serde_json::from_value(serde_json::json!({
            "totalResultsCount": 1,
            "geonames": [{
                "name": "Paris",
                "lat": "48.85341",
                "lng": "2.3488",
                "population": 2_138_551,
                "adminName1": "Île-de-France",
                "fcl": "P"
            }]
        }))
        .unwrap();

        assert_eq!(payload.geonames.len(), 1);
        let city = &payload.geonames[0];
        assert_eq!(city.name, "Paris");
        assert_eq!(city.lat, "48.85341");
        assert_eq!(city.population, 2_138_551);
    }
}
