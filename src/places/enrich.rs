//! Validation and enrichment of venue candidates
//!
//! Turns article-sourced [`PlaceCandidate`]s into [`Recommendation`]s via the
//! lookup provider, and provides the direct-search fallback used when article
//! scraping comes up short. Validation failures are filter outcomes, not
//! errors: a rejected hit is skipped and the next ranked hit is considered.

use std::sync::Arc;

use crate::error::LookupError;
use crate::lexicon::Lexicon;
use crate::models::{PlaceCandidate, PriceTier, Recommendation};
use crate::places::classify::classify;
use crate::places::client::{PlaceHit, PlaceLookup};
use crate::places::types::{
    intersects, place_type_hint, REJECT_PLACE_TYPES, VALID_PLACE_TYPES,
};

/// Fallback image for places without a provider photo
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?auto=format&fit=crop&q=80&w=1600";

/// Attribution label for fallback results that have no article behind them
const DIRECT_ATTRIBUTION: &str = "Google 評論";

/// How many ranked hits to consider per article-sourced lookup
const LOOKUP_DEPTH: usize = 3;

/// Rating floor for direct-search results. Stricter than the article path:
/// these venues were never vetted by an article author.
const DIRECT_RATING_FLOOR: f64 = 3.0;

/// Why a lookup produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Provider returned nothing for the query
    NoResults,
    /// Every ranked hit failed a validation filter
    AllFiltered,
    /// The request itself failed (transport, decode, provider error status)
    ApiError,
}

/// Validates lookup hits and builds enriched records
pub struct PlaceEnricher {
    lookup: Arc<dyn PlaceLookup>,
    lexicon: &'static Lexicon,
}

impl PlaceEnricher {
    pub fn new(lookup: Arc<dyn PlaceLookup>, lexicon: &'static Lexicon) -> Self {
        Self { lookup, lexicon }
    }

    /// Type and address filters shared by both lookup paths
    fn passes_base_filters(&self, hit: &PlaceHit, city: &str) -> bool {
        if intersects(&hit.types, &REJECT_PLACE_TYPES) {
            tracing::debug!(name = %hit.name, "skipping: rejected place type");
            return false;
        }
        if !intersects(&hit.types, &VALID_PLACE_TYPES) {
            tracing::debug!(name = %hit.name, types = ?hit.types, "skipping: no valid place type");
            return false;
        }
        let config = self.lexicon.cities().get(city);
        if !config
            .address_keywords
            .iter()
            .any(|kw| hit.address.contains(kw))
        {
            tracing::debug!(
                name = %hit.name,
                address = %hit.address,
                city = %city,
                "skipping: address outside target city"
            );
            return false;
        }
        true
    }

    /// Validate and enrich one article-sourced candidate against the
    /// lookup provider.
    ///
    /// The query is `"{name} {city}"` biased to the city's coordinates. The
    /// first of the top ranked hits that passes every filter is accepted.
    /// Article-sourced names are already human-vetted, so the rating check
    /// only rejects unrated placeholder listings (rating below 1.0 with
    /// fewer than 5 reviews).
    pub async fn enrich(
        &self,
        candidate: &PlaceCandidate,
        city: &str,
    ) -> Result<Recommendation, RejectReason> {
        let config = self.lexicon.cities().get(city);
        let query = format!("{} {city}", candidate.name);

        let hits = match self.lookup.text_search(&query, config, None).await {
            Ok(hits) => hits,
            Err(LookupError::MissingApiKey) => {
                tracing::warn!("place lookup skipped: API key not configured");
                return Err(RejectReason::ApiError);
            }
            Err(e) => {
                tracing::warn!(name = %candidate.name, error = %e, "place lookup failed");
                return Err(RejectReason::ApiError);
            }
        };
        if hits.is_empty() {
            tracing::debug!(name = %candidate.name, "no lookup results");
            return Err(RejectReason::NoResults);
        }

        for hit in hits.iter().take(LOOKUP_DEPTH) {
            if !self.passes_base_filters(hit, city) {
                continue;
            }
            if hit.rating < 1.0 && hit.user_ratings_total < 5 {
                tracing::debug!(name = %hit.name, "skipping: unrated placeholder listing");
                continue;
            }
            return Ok(self.build_record(hit, city, candidate));
        }

        tracing::debug!(name = %candidate.name, "all lookup results failed validation");
        Err(RejectReason::AllFiltered)
    }

    /// Search the provider directly when article scraping fell short.
    ///
    /// Applies the same type and address filters but a stricter rating
    /// floor, iterating ranked hits until `limit` are accepted. Provider
    /// failure degrades to an empty vec.
    pub async fn direct_search(
        &self,
        keyword: &str,
        city: &str,
        limit: usize,
    ) -> Vec<Recommendation> {
        let config = self.lexicon.cities().get(city);
        let query = format!("{keyword} {city}");
        let type_hint = place_type_hint(keyword);

        tracing::info!(query = %query, type_hint = ?type_hint, "direct place search");

        let hits = match self.lookup.text_search(&query, config, type_hint).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(error = %e, "direct place search failed");
                return Vec::new();
            }
        };

        let mut accepted = Vec::new();
        for hit in &hits {
            if accepted.len() >= limit {
                break;
            }
            if !self.passes_base_filters(hit, city) {
                continue;
            }
            if hit.rating < DIRECT_RATING_FLOOR {
                continue;
            }
            let quote = format!(
                "Google 評分 {} 顆星，共 {} 則評論",
                hit.rating, hit.user_ratings_total
            );
            let mut record = self.record_from_hit(hit, city);
            record.influencer = DIRECT_ATTRIBUTION.to_string();
            record.quote = quote;
            record.article_url = hit.maps_url.clone();
            tracing::debug!(name = %record.name, rating = %record.rating, "accepted direct result");
            accepted.push(record);
        }
        accepted
    }

    /// Record skeleton shared by both paths: identity, category, tier, media
    fn record_from_hit(&self, hit: &PlaceHit, city: &str) -> Recommendation {
        Recommendation {
            name: hit.name.clone(),
            category: classify(&hit.types, &hit.name),
            image: hit
                .photo_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            influencer: String::new(),
            quote: String::new(),
            rating: hit.rating,
            price_range: PriceTier::from_rating(hit.rating),
            location: city.to_string(),
            source_url: hit.maps_url.clone(),
            article_url: String::new(),
            address: hit.address.clone(),
        }
    }

    fn build_record(
        &self,
        hit: &PlaceHit,
        city: &str,
        candidate: &PlaceCandidate,
    ) -> Recommendation {
        let mut record = self.record_from_hit(hit, city);
        record.influencer = candidate.site_label.clone();
        record.quote = candidate.quote.clone();
        record.article_url = candidate.article_url.clone();
        record
    }
}
