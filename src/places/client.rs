//! Place-lookup provider client
//!
//! [`PlaceLookup`] is the narrow capability interface the rest of the crate
//! depends on; [`GooglePlacesClient`] implements it against the Places Text
//! Search API. Provider URL construction and response decoding live here and
//! nowhere else, so tests can substitute a deterministic fake.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::LookupError;
use crate::lexicon::CityConfig;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// One ranked result from the lookup provider, with provider-specific URL
/// shapes already resolved. Transient: discarded once a record or rejection
/// has been produced from it.
#[derive(Debug, Clone)]
pub struct PlaceHit {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub user_ratings_total: u32,
    pub types: Vec<String>,
    /// Resolved photo URL, when the provider returned a photo reference
    pub photo_url: Option<String>,
    /// Map deep link (place-id link when available, text-query link otherwise)
    pub maps_url: String,
}

/// Capability interface for the place-lookup provider
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Text search biased to a city's coordinates and radius, optionally
    /// narrowed by a provider type hint. Results come back in provider rank
    /// order. An empty vec means the provider found nothing; `Err` means the
    /// request itself failed.
    async fn text_search(
        &self,
        query: &str,
        city: &CityConfig,
        type_hint: Option<&str>,
    ) -> Result<Vec<PlaceHit>, LookupError>;
}

// Wire format of the Text Search response
#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    user_ratings_total: u32,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<RawPhoto>,
    #[serde(default)]
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    #[serde(default)]
    photo_reference: String,
}

/// Google Places Text Search client
pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    /// Create a client with the given API key and per-request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: TEXT_SEARCH_URL.to_string(),
        })
    }

    /// Create a client pointed at a custom endpoint (mock servers in tests)
    pub fn with_base_url(
        api_key: impl Into<String>,
        timeout: Duration,
        base_url: impl Into<String>,
    ) -> Result<Self, LookupError> {
        let mut client = Self::new(api_key, timeout)?;
        client.base_url = base_url.into();
        Ok(client)
    }

    /// Resolve a photo reference to a fetchable photo URL
    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{PHOTO_URL}?maxwidth=800&photoreference={photo_reference}&key={}",
            self.api_key
        )
    }

    /// Build the map deep link for a hit
    fn maps_url(&self, name: &str, place_id: &str) -> String {
        let params: Vec<(&str, &str)> = if place_id.is_empty() {
            vec![("api", "1"), ("query", name)]
        } else {
            vec![("api", "1"), ("query", name), ("query_place_id", place_id)]
        };
        match Url::parse_with_params(MAPS_SEARCH_URL, &params) {
            Ok(url) => url.to_string(),
            Err(_) => MAPS_SEARCH_URL.to_string(),
        }
    }

    fn into_hit(&self, raw: RawPlace, city_name: &str) -> PlaceHit {
        let photo_url = raw
            .photos
            .first()
            .filter(|p| !p.photo_reference.is_empty())
            .map(|p| self.photo_url(&p.photo_reference));
        // Without a place id the deep link degrades to a name+city text query
        let maps_url = if raw.place_id.is_empty() {
            self.maps_url(&format!("{} {city_name}", raw.name), "")
        } else {
            self.maps_url(&raw.name, &raw.place_id)
        };

        PlaceHit {
            name: raw.name,
            address: raw.formatted_address,
            rating: raw.rating,
            user_ratings_total: raw.user_ratings_total,
            types: raw.types,
            photo_url,
            maps_url,
        }
    }
}

#[async_trait]
impl PlaceLookup for GooglePlacesClient {
    async fn text_search(
        &self,
        query: &str,
        city: &CityConfig,
        type_hint: Option<&str>,
    ) -> Result<Vec<PlaceHit>, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let location = format!("{},{}", city.lat, city.lng);
        let radius = city.radius_m.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("query", query),
            ("key", &self.api_key),
            ("language", "zh-TW"),
            ("region", "tw"),
            ("location", &location),
            ("radius", &radius),
        ];
        if let Some(hint) = type_hint {
            params.push(("type", hint));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;
        let body = response.text().await?;
        let parsed: TextSearchResponse = serde_json::from_str(&body)?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed
                .results
                .into_iter()
                .map(|raw| self.into_hit(raw, city.name))
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(LookupError::Status(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GooglePlacesClient {
        GooglePlacesClient::new("test-key", Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_photo_url_carries_reference_and_key() {
        let url = client().photo_url("ref123");
        assert!(url.contains("photoreference=ref123"));
        assert!(url.contains("key=test-key"));
        assert!(url.contains("maxwidth=800"));
    }

    #[test]
    fn test_maps_url_with_place_id() {
        let url = client().maps_url("鼎泰豐", "abc123");
        assert!(url.starts_with(MAPS_SEARCH_URL));
        assert!(url.contains("query_place_id=abc123"));
    }

    #[test]
    fn test_maps_url_without_place_id() {
        let url = client().maps_url("鼎泰豐 台北", "");
        assert!(url.starts_with(MAPS_SEARCH_URL));
        assert!(!url.contains("query_place_id"));
    }

    #[test]
    fn test_response_decoding_defaults() {
        let body = r#"{"status":"OK","results":[{"name":"A"}]}"#;
        let parsed: TextSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].rating, 0.0);
        assert!(parsed.results[0].types.is_empty());
    }
}
