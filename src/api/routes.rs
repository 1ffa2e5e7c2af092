use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::health::get_test;
use crate::classifier::classify;
use crate::config::Config;
use crate::error::AppError;
use crate::fetcher::{fetch_listings, parse_listing};
use crate::format::to_classified;
use crate::refine::Refinement;
use crate::types::{ClassifiedListing, RawListing, SearchType};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Arc<Config>,
    pub client: reqwest::Client,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/properties", get(get_properties))
        .route("/api/test", get(get_test))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query params / responses
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PropertiesQuery {
    #[serde(rename = "type")]
    pub search: Option<String>,
}

impl PropertiesQuery {
    /// Absent or blank → bargain.
    pub fn search_type(&self) -> Result<SearchType, AppError> {
        match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse(),
            _ => Ok(SearchType::default()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    pub properties: Vec<ClassifiedListing>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_properties(
    State(state): State<ApiState>,
    Query(params): Query<PropertiesQuery>,
    Query(refinement): Query<Refinement>,
) -> Result<Json<PropertiesResponse>, AppError> {
    let search = params.search_type()?;

    let raw = fetch_listings(&state.client, &state.cfg).await.map_err(|e| {
        warn!("[SEARCH] type={search} failed: {e}");
        e
    })?;

    let fetched = raw.len();
    let properties = build_properties(search, &raw, Utc::now(), &state.cfg, &refinement);
    info!("[SEARCH] type={search} fetched={fetched} kept={}", properties.len());

    Ok(Json(PropertiesResponse { properties }))
}

/// parse → classify/filter → format → refine, for one batch of raw upstream
/// listings. Listings are independent; one malformed entry only degrades itself.
pub fn build_properties(
    search: SearchType,
    raw: &[Value],
    now: DateTime<Utc>,
    cfg: &Config,
    refinement: &Refinement,
) -> Vec<ClassifiedListing> {
    let listings: Vec<RawListing> = raw.iter().map(parse_listing).collect();
    let classified = classify(search, &listings, now)
        .into_iter()
        .map(|(listing, tags)| to_classified(listing, tags, cfg))
        .collect();
    refinement.apply(classified)
}
