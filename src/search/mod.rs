//! Web article search
//!
//! [`ArticleSearch`] is the capability interface the pipeline depends on;
//! [`DuckDuckGoSearcher`] implements it against the DuckDuckGo Lite endpoint,
//! which needs no API key. Search failure is always recoverable at this
//! stage (the other language's search may still succeed), so the interface
//! is infallible: failures are logged and yield an empty list.

use async_trait::async_trait;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;
use crate::extract::fetcher::random_user_agent;
use crate::models::ArticleRef;

/// Public lite endpoint; swappable for tests or an authenticated provider
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://lite.duckduckgo.com/lite/";

/// URL fragments that mark an advertisement result
const AD_URL_MARKERS: &[&str] = &[
    "duckduckgo.com/y.js",
    "ad_domain",
    "ad_provider",
    "bing.com/aclick",
];

/// Title fragments that mark a sponsored result
const AD_TITLE_MARKERS: &[&str] = &["more info", "sponsored"];

lazy_static! {
    static ref RESULT_LINK: Selector =
        Selector::parse("a.result-link").expect("Invalid CSS selector: a.result-link");

    /// Known content sites with a human-readable label
    static ref SITE_LABELS: HashMap<&'static str, &'static str> = [
        ("supertaste.tvbs.com.tw", "食尚玩家"),
        ("udn.com", "聯合新聞網"),
        ("travel.ettoday.net", "ETtoday旅遊雲"),
        ("walkerland.com.tw", "WalkerLand窩客島"),
        ("ifoodie.tw", "愛食記"),
        ("boo2k.com", "波波黛莉"),
        ("girlstyle.com", "GirlStyle女生日常"),
        ("beauty321.com", "Beauty美人圈"),
    ]
    .into_iter()
    .collect();
}

/// Human-readable source name for an article URL: the mapped label for known
/// sites, otherwise the bare domain with any `www.` prefix stripped.
pub fn site_label(article_url: &str) -> String {
    let domain = Url::parse(article_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();
    let domain = domain.strip_prefix("www.").unwrap_or(&domain);
    SITE_LABELS
        .get(domain)
        .map(|label| (*label).to_string())
        .unwrap_or_else(|| domain.to_string())
}

/// Capability interface for the web search provider
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Best-effort search: at most `max_results` article references, empty
    /// on provider failure.
    async fn search(&self, query: &str, max_results: usize) -> Vec<ArticleRef>;
}

/// DuckDuckGo Lite searcher
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoSearcher {
    /// Create a searcher with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_endpoint(timeout, DEFAULT_SEARCH_ENDPOINT)
    }

    /// Create a searcher against a custom endpoint (mock servers in tests)
    pub fn with_endpoint(
        timeout: Duration,
        endpoint: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn try_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ArticleRef>, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::USER_AGENT, random_user_agent())
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(parse_results(&body, max_results))
    }
}

/// Extract article references from a result page, dropping ads and
/// truncating to `max_results`.
fn parse_results(html: &str, max_results: usize) -> Vec<ArticleRef> {
    let document = Html::parse_document(html);
    let mut articles = Vec::new();

    for link in document.select(&RESULT_LINK) {
        if articles.len() >= max_results {
            break;
        }
        let href = link.value().attr("href").unwrap_or_default();
        let title = link.text().collect::<String>().trim().to_string();

        if AD_URL_MARKERS.iter().any(|marker| href.contains(marker)) {
            continue;
        }
        let title_lower = title.to_lowercase();
        if AD_TITLE_MARKERS
            .iter()
            .any(|marker| title_lower.contains(marker))
        {
            continue;
        }
        if !href.starts_with("http") {
            continue;
        }

        articles.push(ArticleRef {
            url: href.to_string(),
            title,
            site_label: site_label(href),
        });
    }

    articles
}

#[async_trait]
impl ArticleSearch for DuckDuckGoSearcher {
    async fn search(&self, query: &str, max_results: usize) -> Vec<ArticleRef> {
        match self.try_search(query, max_results).await {
            Ok(articles) => {
                tracing::info!(query = %query, found = articles.len(), "article search");
                articles
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "article search failed");
                Vec::new()
            }
        }
    }
}
