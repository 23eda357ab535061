//! Visitor-facing read routes
//!
//! Nothing here needs a session; hidden rows never leave the store.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::DirectoryError;
use crate::domains::creators::Creator;
use crate::domains::prompts::TrendingPrompt;
use crate::domains::resources::{
    browse_resources, creator_profile, list_visible_creators, suggestions, CreatorProfile,
    Resource, ResourceQuery, Suggestion, CATEGORY_FILTERS, TRENDING_TAGS,
};
use crate::server::app::AppState;

pub async fn list_resources_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Json<Vec<Resource>> {
    Json(browse_resources(&state.directory.store, &query).await)
}

pub async fn list_creators_handler(Extension(state): Extension<AppState>) -> Json<Vec<Creator>> {
    Json(list_visible_creators(&state.directory.store).await)
}

pub async fn creator_profile_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CreatorProfile>, DirectoryError> {
    Ok(Json(creator_profile(&state.directory.store, &slug).await?))
}

pub async fn list_prompts_handler(
    Extension(state): Extension<AppState>,
) -> Json<Vec<TrendingPrompt>> {
    Json(state.directory.store.prompts.snapshot().await)
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
    pub trending_tags: &'static [&'static str],
    pub categories: &'static [&'static str],
}

pub async fn suggestions_handler(Query(params): Query<SuggestionParams>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: suggestions(&params.q),
        trending_tags: &TRENDING_TAGS,
        categories: &CATEGORY_FILTERS,
    })
}
