//! tastemap - Travel Venue Discovery Pipeline
//!
//! Discovers named real-world venues (restaurants, attractions, shops)
//! recommended in web articles for a free-text query, cross-validates each
//! candidate against Google Places, and returns a paginated, deduplicated
//! result set with a reviewer quote, rating, category and canonical address.
//!
//! # Architecture
//!
//! - [`lexicon`] - Static lookup tables and per-city geo configuration
//! - [`query`] - Free-text query parsing into structured facets
//! - [`search`] - Web article search (DuckDuckGo Lite)
//! - [`extract`] - Article fetching and venue-name extraction
//! - [`places`] - Place lookup, validation and enrichment (Google Places)
//! - [`pipeline`] - The paginated discovery-and-enrichment orchestrator
//! - [`storage`] - Recommendation persistence (SQLite)
//! - [`server`] - HTTP API surface (axum)
//! - [`config`] - Configuration management
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tastemap::pipeline::{Pipeline, PipelineConfig};
//! use tastemap::places::GooglePlacesClient;
//! use tastemap::search::DuckDuckGoSearcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let searcher = Arc::new(DuckDuckGoSearcher::new(Duration::from_secs(15))?);
//!     let places = Arc::new(GooglePlacesClient::new(
//!         std::env::var("GOOGLE_API_KEY")?,
//!         Duration::from_secs(10),
//!     )?);
//!     let pipeline = Pipeline::new(searcher, places, PipelineConfig::default())?;
//!     let (results, has_more) = pipeline.run("東京好吃的拉麵", 10, 1).await?;
//!     println!("{} results, more: {has_more}", results.len());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod models;
pub mod pipeline;
pub mod places;
pub mod query;
pub mod search;
pub mod server;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::lexicon::Lexicon;
    pub use crate::models::{ArticleRef, Category, PlaceCandidate, PriceTier, Recommendation};
    pub use crate::pipeline::{Pipeline, PipelineConfig};
    pub use crate::query::{ParsedQuery, QueryParser};
    pub use crate::storage::{RecommendationStore, SqliteStore};
}

// Direct re-exports for convenience
pub use models::{Category, PriceTier, Recommendation};
