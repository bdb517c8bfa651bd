//! Discovery-and-enrichment pipeline
//!
//! Composes the query parser, bilingual article search, article extraction,
//! place enrichment and the direct-search fallback into one paginated run:
//!
//! ```text
//! keyword -> parse -> {zh, en} queries -> article search (x2, concurrent)
//!         -> merge/dedup by URL -> extract candidates (bounded concurrency)
//!         -> enrich until target met (bounded concurrency, early stop)
//!         -> [direct search fallback if short] -> page slice + has_more
//! ```
//!
//! The run over-fetches one record past the requested page (the probe) so
//! `has_more` can be answered without a second pass. Ordering is stable
//! within a single run; across runs `has_more` is a best-effort hint.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::extract::{ArticleExtractor, ExtractedPlace, PageFetcher};
use crate::lexicon::Lexicon;
use crate::models::{ArticleRef, PlaceCandidate, Recommendation};
use crate::places::{PlaceEnricher, PlaceLookup};
use crate::query::QueryParser;
use crate::search::ArticleSearch;

/// Articles fetched per run: grows mildly with the page number so deeper
/// pages see fresh material, capped to keep provider usage bounded
fn article_quota(page: usize) -> usize {
    (5 + 2 * (page.saturating_sub(1))).min(10)
}

/// Per-language share of the article quota, never below 2
fn per_language_quota(page: usize) -> usize {
    (article_quota(page) / 2).max(2)
}

/// Tuning knobs for one pipeline instance
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Concurrent article fetches
    pub fetch_concurrency: usize,
    /// Concurrent place lookups
    pub lookup_concurrency: usize,
    /// Venue names taken from a single article
    pub names_per_article: usize,
    /// Article page fetch pacing (requests per second)
    pub fetch_rate_per_sec: u32,
    /// Article page fetch timeout
    pub fetch_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: 4,
            lookup_concurrency: 4,
            names_per_article: 5,
            fetch_rate_per_sec: 2,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// The discovery-and-enrichment orchestrator
pub struct Pipeline {
    parser: QueryParser,
    searcher: Arc<dyn ArticleSearch>,
    fetcher: PageFetcher,
    extractor: ArticleExtractor,
    enricher: PlaceEnricher,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        searcher: Arc<dyn ArticleSearch>,
        places: Arc<dyn PlaceLookup>,
        config: PipelineConfig,
    ) -> Result<Self> {
        let lexicon = Lexicon::shared();
        let fetcher = PageFetcher::with_config(config.fetch_rate_per_sec, config.fetch_timeout)?;
        Ok(Self {
            parser: QueryParser::new(lexicon),
            searcher,
            fetcher,
            extractor: ArticleExtractor::new(),
            enricher: PlaceEnricher::new(places, lexicon),
            config,
        })
    }

    /// Run the full pipeline for one page of results.
    ///
    /// Returns the `[offset, offset+limit)` slice of the run's result pool
    /// and whether at least one further page exists. Dropping the returned
    /// future cancels in-flight provider calls for this run.
    pub async fn run(
        &self,
        keyword: &str,
        limit: usize,
        page: usize,
    ) -> Result<(Vec<Recommendation>, bool)> {
        let page = page.max(1);
        let offset = (page - 1) * limit;
        // One extra record probes whether a further page exists
        let target = offset + limit + 1;

        let parsed = self.parser.parse(keyword);
        let city = parsed.city.clone();
        let zh_query = parsed.to_zh_query();
        let en_query = parsed.to_en_query();
        tracing::info!(
            keyword = %keyword,
            city = %city,
            zh_query = %zh_query,
            en_query = %en_query,
            page = %page,
            "pipeline run"
        );

        // Bilingual article search, merged zh-first and deduped by URL
        let per_language = per_language_quota(page);
        let (zh_articles, en_articles) = tokio::join!(
            self.searcher.search(&zh_query, per_language),
            self.searcher.search(&en_query, per_language),
        );
        let articles = merge_articles(zh_articles, en_articles);
        tracing::info!(articles = articles.len(), "bilingual search merged");

        // Extract candidates in article order; fetches overlap but results
        // accumulate in order, stopping once 3x target names are in hand
        let mut candidates: Vec<PlaceCandidate> = Vec::new();
        {
            let mut seen_names: HashSet<String> = HashSet::new();
            let mut extraction = stream::iter(articles.iter().cloned())
                .map(|article| async move {
                    let places = self.extract_article(&article.url).await;
                    (article, places)
                })
                .buffered(self.config.fetch_concurrency);

            while let Some((article, places)) = extraction.next().await {
                for place in places {
                    if seen_names.insert(place.name.clone()) {
                        candidates.push(to_candidate(place, &article));
                    }
                }
                if candidates.len() >= target * 3 {
                    break;
                }
            }
        }
        tracing::info!(candidates = candidates.len(), "candidate names collected");

        // Enrich in accumulation order until the probe target is met. The
        // early break stops polling the stream, which drops in-flight
        // lookups and issues no new ones.
        let mut results: Vec<Recommendation> = Vec::new();
        let mut skipped = 0usize;
        {
            let mut lookups = stream::iter(candidates.iter().cloned())
                .map(|candidate| {
                    let city = city.clone();
                    async move { self.enricher.enrich(&candidate, &city).await }
                })
                .buffered(self.config.lookup_concurrency);

            while let Some(outcome) = lookups.next().await {
                match outcome {
                    Ok(record) => {
                        tracing::info!(name = %record.name, rating = %record.rating, "accepted");
                        results.push(record);
                        if results.len() >= target {
                            break;
                        }
                    }
                    Err(reason) => {
                        tracing::debug!(reason = ?reason, "candidate not enriched");
                        skipped += 1;
                    }
                }
            }
        }
        tracing::info!(
            enriched = results.len(),
            skipped = skipped,
            "enrichment finished"
        );

        // Fallback: fill the shortfall straight from the place provider
        if results.len() < target {
            let shortfall = target - results.len();
            tracing::info!(shortfall = shortfall, "falling back to direct place search");
            let direct = self
                .enricher
                .direct_search(&zh_query, &city, shortfall + 5)
                .await;
            let mut existing: HashSet<String> =
                results.iter().map(|r| r.name.clone()).collect();
            for record in direct {
                if results.len() >= target {
                    break;
                }
                if existing.insert(record.name.clone()) {
                    results.push(record);
                }
            }
        }

        let has_more = results.len() > offset + limit;
        let page_results: Vec<Recommendation> =
            results.into_iter().skip(offset).take(limit).collect();
        tracing::info!(
            returned = page_results.len(),
            has_more = has_more,
            "pipeline complete"
        );

        Ok((page_results, has_more))
    }

    /// Fetch and extract one article; any failure degrades to no candidates
    async fn extract_article(&self, url: &str) -> Vec<ExtractedPlace> {
        match self.fetcher.fetch(url).await {
            Ok(html) => {
                let places = self.extractor.extract(&html, self.config.names_per_article);
                tracing::debug!(url = %url, extracted = places.len(), "article extracted");
                places
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "article fetch failed");
                Vec::new()
            }
        }
    }
}

/// Merge the bilingual search results, first-seen URL wins, zh results first
fn merge_articles(zh: Vec<ArticleRef>, en: Vec<ArticleRef>) -> Vec<ArticleRef> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for article in zh.into_iter().chain(en) {
        if seen.insert(article.url.clone()) {
            merged.push(article);
        }
    }
    merged
}

fn to_candidate(place: ExtractedPlace, article: &ArticleRef) -> PlaceCandidate {
    PlaceCandidate {
        name: place.name,
        quote: place.quote,
        article_title: article.title.clone(),
        article_url: article.url.clone(),
        site_label: article.site_label.clone(),
    }
}
