//! CLI command implementations

pub mod parse;
pub mod search;
pub mod serve;

pub use parse::parse;
pub use search::search;
pub use serve::serve;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::places::GooglePlacesClient;
use crate::search::DuckDuckGoSearcher;

/// Wire the provider clients and pipeline from configuration
pub(crate) fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let searcher = match &config.search.endpoint {
        Some(endpoint) => {
            DuckDuckGoSearcher::with_endpoint(config.search_timeout(), endpoint.clone())
        }
        None => DuckDuckGoSearcher::new(config.search_timeout()),
    }
    .context("Failed to create article searcher")?;

    let places = match &config.places.endpoint {
        Some(endpoint) => GooglePlacesClient::with_base_url(
            config.places.api_key.clone(),
            config.places_timeout(),
            endpoint.clone(),
        ),
        None => GooglePlacesClient::new(config.places.api_key.clone(), config.places_timeout()),
    }
    .context("Failed to create place lookup client")?;

    Pipeline::new(Arc::new(searcher), Arc::new(places), config.pipeline_config())
        .context("Failed to create pipeline")
}
