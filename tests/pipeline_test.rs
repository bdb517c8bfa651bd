//! Pipeline orchestration tests with fake providers
//!
//! The article searcher and the place-lookup provider are replaced with
//! in-process fakes (plus a wiremock server for article pages) so the
//! pagination contract, candidate dedup, early stop and the direct-search
//! fallback can be exercised deterministically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tastemap::error::LookupError;
use tastemap::lexicon::CityConfig;
use tastemap::models::ArticleRef;
use tastemap::pipeline::{Pipeline, PipelineConfig};
use tastemap::places::{PlaceHit, PlaceLookup};
use tastemap::search::ArticleSearch;

// ============================================================================
// Fakes
// ============================================================================

/// Searcher returning a fixed article list for every query
struct FixedSearch {
    articles: Vec<ArticleRef>,
}

impl FixedSearch {
    fn empty() -> Arc<Self> {
        Arc::new(Self {
            articles: Vec::new(),
        })
    }

    fn with_urls(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            articles: urls
                .iter()
                .map(|url| ArticleRef {
                    url: (*url).to_string(),
                    title: "測試文章".to_string(),
                    site_label: "測試站".to_string(),
                })
                .collect(),
        })
    }
}

#[async_trait]
impl ArticleSearch for FixedSearch {
    async fn search(&self, _query: &str, max_results: usize) -> Vec<ArticleRef> {
        self.articles.iter().take(max_results).cloned().collect()
    }
}

fn restaurant_hit(name: &str, rating: f64) -> PlaceHit {
    PlaceHit {
        name: name.to_string(),
        address: format!("台北市大安區某路 {name}"),
        rating,
        user_ratings_total: 500,
        types: vec!["restaurant".to_string(), "point_of_interest".to_string()],
        photo_url: None,
        maps_url: format!("https://maps.example/{name}"),
    }
}

/// Lookup fake: enrich queries (`"{name} {city}"`) resolve against a known
/// set; every other query returns the configured fallback pool.
struct FakeLookup {
    known: HashMap<String, PlaceHit>,
    pool: Vec<PlaceHit>,
    calls: AtomicUsize,
}

impl FakeLookup {
    fn new(known_names: &[&str], pool: Vec<PlaceHit>) -> Arc<Self> {
        Arc::new(Self {
            known: known_names
                .iter()
                .map(|name| ((*name).to_string(), restaurant_hit(name, 4.2)))
                .collect(),
            pool,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceLookup for FakeLookup {
    async fn text_search(
        &self,
        query: &str,
        _city: &CityConfig,
        _type_hint: Option<&str>,
    ) -> Result<Vec<PlaceHit>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = query.strip_suffix(" 台北").unwrap_or(query);
        if let Some(hit) = self.known.get(name) {
            return Ok(vec![hit.clone()]);
        }
        Ok(self.pool.clone())
    }
}

fn pipeline(searcher: Arc<dyn ArticleSearch>, lookup: Arc<dyn PlaceLookup>) -> Pipeline {
    Pipeline::new(searcher, lookup, PipelineConfig::default()).unwrap()
}

// ============================================================================
// Pagination contract (fallback-only pool)
// ============================================================================

/// With no articles, the whole pool comes from the direct-search fallback,
/// giving a deterministic result set to check pagination against.
async fn run_page(pool_size: usize, limit: usize, page: usize) -> (usize, bool) {
    let pool: Vec<PlaceHit> = (0..pool_size)
        .map(|i| restaurant_hit(&format!("店{i}"), 4.0))
        .collect();
    let lookup = FakeLookup::new(&[], pool);
    let p = pipeline(FixedSearch::empty(), lookup);
    let (results, has_more) = p.run("台北 拉麵", limit, page).await.unwrap();
    (results.len(), has_more)
}

#[tokio::test]
async fn test_pagination_first_page() {
    let (count, has_more) = run_page(7, 3, 1).await;
    assert_eq!(count, 3);
    assert!(has_more);
}

#[tokio::test]
async fn test_pagination_middle_page() {
    let (count, has_more) = run_page(7, 3, 2).await;
    assert_eq!(count, 3);
    assert!(has_more);
}

#[tokio::test]
async fn test_pagination_last_partial_page() {
    let (count, has_more) = run_page(7, 3, 3).await;
    assert_eq!(count, 1);
    assert!(!has_more);
}

#[tokio::test]
async fn test_pagination_past_the_end() {
    let (count, has_more) = run_page(7, 3, 4).await;
    assert_eq!(count, 0);
    assert!(!has_more);
}

#[tokio::test]
async fn test_pagination_exact_boundary() {
    // Pool of exactly limit: one full page and no probe record
    let (count, has_more) = run_page(3, 3, 1).await;
    assert_eq!(count, 3);
    assert!(!has_more);
}

// ============================================================================
// Article path: extraction, dedup, enrichment, fallback fill
// ============================================================================

fn article_html(names: &[&str]) -> String {
    let mut body = String::new();
    for name in names {
        body.push_str(&format!(
            "<h2>{name}</h2><p>這間店的招牌料理令人印象深刻，環境舒適服務親切，非常值得專程前往一試。</p>"
        ));
    }
    format!("<html><body><article>{body}</article></body></html>")
}

#[tokio::test]
async fn test_article_candidates_deduped_and_enriched_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html(&["鳴龍拉麵", "麵屋一燈"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html(&["麵屋一燈", "五之神製作所"])),
        )
        .mount(&server)
        .await;

    let searcher = FixedSearch::with_urls(&[
        &format!("{}/a1", server.uri()),
        &format!("{}/a2", server.uri()),
    ]);
    // 麵屋一燈 is known to the provider only as a duplicate source of
    // ambiguity; leave it unknown so rejection is observable
    let lookup = FakeLookup::new(&["鳴龍拉麵", "五之神製作所"], Vec::new());

    let p = pipeline(searcher, lookup.clone());
    let (results, has_more) = p.run("台北 拉麵", 2, 1).await.unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["鳴龍拉麵", "五之神製作所"]);
    assert!(!has_more);

    // The duplicate candidate was looked up at most once; with the direct
    // fallback that is at most 4 calls total (3 candidates + 1 fallback)
    assert!(lookup.call_count() <= 4, "calls: {}", lookup.call_count());
}

#[tokio::test]
async fn test_enrichment_carries_article_attribution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(&["鳴龍拉麵"])))
        .mount(&server)
        .await;

    let searcher = FixedSearch::with_urls(&[&format!("{}/a1", server.uri())]);
    let lookup = FakeLookup::new(&["鳴龍拉麵"], Vec::new());

    let p = pipeline(searcher, lookup);
    let (results, _) = p.run("台北 拉麵", 1, 1).await.unwrap();

    assert_eq!(results.len(), 1);
    let rec = &results[0];
    assert_eq!(rec.influencer, "測試站");
    assert!(rec.quote.contains("招牌料理"));
    assert!(rec.article_url.contains("/a1"));
    assert_eq!(rec.location, "台北");
}

#[tokio::test]
async fn test_fallback_fills_shortfall_without_duplicating_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(&["鳴龍拉麵"])))
        .mount(&server)
        .await;

    let searcher = FixedSearch::with_urls(&[&format!("{}/a1", server.uri())]);
    // The fallback pool contains the already-enriched name plus fresh ones
    let pool = vec![
        restaurant_hit("鳴龍拉麵", 4.2),
        restaurant_hit("補位一號店", 4.1),
        restaurant_hit("補位二號店", 4.0),
    ];
    let lookup = FakeLookup::new(&["鳴龍拉麵"], pool);

    let p = pipeline(searcher, lookup);
    let (results, _) = p.run("台北 拉麵", 3, 1).await.unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["鳴龍拉麵", "補位一號店", "補位二號店"]);
}

#[tokio::test]
async fn test_dead_article_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let searcher = FixedSearch::with_urls(&[&format!("{}/dead", server.uri())]);
    let pool = vec![restaurant_hit("備援店", 4.4)];
    let lookup = FakeLookup::new(&[], pool);

    let p = pipeline(searcher, lookup);
    let (results, has_more) = p.run("台北 拉麵", 5, 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "備援店");
    assert_eq!(results[0].influencer, "Google 評論");
    assert!(!has_more);
}

#[tokio::test]
async fn test_lookup_early_stop_bounds_provider_calls() {
    let server = MockServer::start().await;
    let names: Vec<String> = (0..10).map(|i| format!("候選好店{i}號")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_html(&name_refs)))
        .mount(&server)
        .await;

    let searcher = FixedSearch::with_urls(&[&format!("{}/big", server.uri())]);
    let lookup = FakeLookup::new(&name_refs, Vec::new());

    let config = PipelineConfig {
        names_per_article: 10,
        ..PipelineConfig::default()
    };
    let p = Pipeline::new(searcher, lookup.clone(), config).unwrap();
    let (results, has_more) = p.run("台北 拉麵", 1, 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(has_more);
    // Target is 2 (limit + probe): the stream stops issuing lookups once
    // the target is reached, so far fewer than 10 calls go out
    assert!(
        lookup.call_count() <= 6,
        "early stop should bound calls, got {}",
        lookup.call_count()
    );
}
