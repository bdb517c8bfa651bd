//! HTTP API surface
//!
//! Three endpoints: stored recommendations (rating descending), the search
//! pipeline with pagination, and a liveness marker. Caller input errors are
//! rejected at this boundary before the pipeline runs; internal failures
//! surface as a generic error body, never a stack trace.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::models::Recommendation;
use crate::pipeline::Pipeline;
use crate::storage::RecommendationStore;

/// Largest page size a caller may request
const MAX_LIMIT: usize = 20;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The discovery pipeline
    pub pipeline: Arc<Pipeline>,

    /// Recommendation persistence
    pub store: Arc<dyn RecommendationStore>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, store: Arc<dyn RecommendationStore>) -> Self {
        Self {
            pipeline,
            store,
            start_time: Instant::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: u64,
}

/// Error response body; deliberately generic for internal failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Search endpoint query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
    page: Option<usize>,
    limit: Option<usize>,
}

/// Search endpoint response. `has_more` is a best-effort hint: result
/// ordering is stable within one run but can differ between runs.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Recommendation>,
    pub has_more: bool,
    pub page: usize,
}

/// Build the API router with CORS and request tracing
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/recommendations", get(list_recommendations))
        .route("/api/search", get(search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Liveness marker
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// All stored recommendations, best rating first
async fn list_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recommendation>>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.all_by_rating() {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!(error = %e, "failed to read recommendations");
            Err(internal_error())
        }
    }
}

/// Run the discovery pipeline for one page and persist the results.
///
/// `page` must be at least 1 and `limit` between 1 and 20; anything else is
/// rejected before the pipeline runs. Page 1 replaces the stored records,
/// deeper pages append new names.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(10);

    if params.q.trim().is_empty() {
        return Err(bad_request("query must not be empty"));
    }
    if page < 1 {
        return Err(bad_request("page must be at least 1"));
    }
    if limit < 1 || limit > MAX_LIMIT {
        return Err(bad_request("limit must be between 1 and 20"));
    }

    let (results, has_more) = match state.pipeline.run(&params.q, limit, page).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, query = %params.q, "pipeline run failed");
            return Err(internal_error());
        }
    };

    if let Err(e) = state.store.save(&results, page > 1) {
        tracing::error!(error = %e, "failed to persist results");
        return Err(internal_error());
    }

    Ok(Json(SearchResponse {
        results,
        has_more,
        page,
    }))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("internal server error")),
    )
}
