//! Admin dashboard routes
//!
//! Every handler first turns the request's auth user into a grant for the
//! capability it needs, then delegates to the domain action.

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{AdminCapability, CreatorId, DirectoryError, PromptId, ResourceId};
use crate::directory::LoadSummary;
use crate::domains::creators::{
    create_creator, toggle_creator_hidden, toggle_creator_verified, update_creator, Creator,
    CreatorPatch, NewCreator,
};
use crate::domains::media::{upload_media, MediaBucket};
use crate::domains::prompts::{create_prompt, delete_prompt, NewPrompt, TrendingPrompt};
use crate::domains::resources::{
    approve_resource, dashboard_stats, ingest_resource, insert_resource, list_admin_resources,
    reject_resource, set_resource_health, toggle_resource_hidden, update_resource, wipe_resource,
    DashboardStats, NewResource, Resource, ResourceHealth, ResourcePatch, ResourceStatus,
};
use crate::server::app::{AppState, FILE_NAME_HEADER};
use crate::server::middleware::{require_admin, AuthUser};

type AdminResult<T> = Result<Json<T>, DirectoryError>;

fn user(auth: &Option<Extension<AuthUser>>) -> Option<&AuthUser> {
    auth.as_ref().map(|Extension(user)| user)
}

pub async fn stats_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> AdminResult<DashboardStats> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    Ok(Json(dashboard_stats(&state.directory.store, &grant).await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminListParams {
    pub status: Option<ResourceStatus>,
    pub q: String,
}

pub async fn list_resources_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(params): Query<AdminListParams>,
) -> AdminResult<Vec<Resource>> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let resources =
        list_admin_resources(&state.directory.store, &grant, params.status, &params.q).await?;
    Ok(Json(resources))
}

pub async fn insert_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewResource>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    Ok(Json(
        insert_resource(&directory.store, &directory.deps, &grant, input).await?,
    ))
}

pub async fn ingest_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewResource>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::IngestResources).await?;
    let directory = &state.directory;
    Ok(Json(
        ingest_resource(&directory.store, &directory.deps, &grant, input).await?,
    ))
}

pub async fn update_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(patch): Json<ResourcePatch>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        update_resource(&directory.store, &directory.deps, &grant, &id, patch).await?,
    ))
}

/// Review-modal edits; an empty body means none, a malformed one is refused
fn parse_edits(body: &[u8]) -> Result<Option<ResourcePatch>, DirectoryError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| DirectoryError::Validation(format!("invalid approval edits: {}", e)))
}

/// Approve, optionally with edits made in the review modal
pub async fn approve_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let edits = parse_edits(&body)?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        approve_resource(&directory.store, &directory.deps, &grant, &id, edits).await?,
    ))
}

pub async fn reject_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        reject_resource(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

pub async fn hide_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        toggle_resource_hidden(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct HealthReport {
    pub health: ResourceHealth,
}

pub async fn set_health_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(report): Json<HealthReport>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        set_resource_health(&directory.store, &directory.deps, &grant, &id, report.health).await?,
    ))
}

pub async fn wipe_resource_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<Resource> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    let directory = &state.directory;
    let id = ResourceId::new(id);
    Ok(Json(
        wipe_resource(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

pub async fn create_creator_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewCreator>,
) -> AdminResult<Creator> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManageCreators).await?;
    let directory = &state.directory;
    Ok(Json(
        create_creator(&directory.store, &directory.deps, &grant, input).await?,
    ))
}

pub async fn update_creator_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    Json(patch): Json<CreatorPatch>,
) -> AdminResult<Creator> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManageCreators).await?;
    let directory = &state.directory;
    let id = CreatorId::new(id);
    Ok(Json(
        update_creator(&directory.store, &directory.deps, &grant, &id, patch).await?,
    ))
}

pub async fn verify_creator_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<Creator> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManageCreators).await?;
    let directory = &state.directory;
    let id = CreatorId::new(id);
    Ok(Json(
        toggle_creator_verified(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

pub async fn hide_creator_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<Creator> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManageCreators).await?;
    let directory = &state.directory;
    let id = CreatorId::new(id);
    Ok(Json(
        toggle_creator_hidden(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

pub async fn create_prompt_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(input): Json<NewPrompt>,
) -> AdminResult<TrendingPrompt> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManagePrompts).await?;
    let directory = &state.directory;
    Ok(Json(
        create_prompt(&directory.store, &directory.deps, &grant, input).await?,
    ))
}

pub async fn delete_prompt_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> AdminResult<TrendingPrompt> {
    let grant = require_admin(user(&auth), &state, AdminCapability::ManagePrompts).await?;
    let directory = &state.directory;
    let id = PromptId::new(id);
    Ok(Json(
        delete_prompt(&directory.store, &directory.deps, &grant, &id).await?,
    ))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Raw image body; the original file name travels in `x-file-name`
pub async fn upload_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(bucket): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AdminResult<UploadResponse> {
    let grant = require_admin(user(&auth), &state, AdminCapability::UploadMedia).await?;
    let bucket: MediaBucket = bucket.parse()?;
    let file_name = headers
        .get(FILE_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let url = upload_media(&state.directory.deps, &grant, bucket, file_name, body.to_vec()).await?;
    Ok(Json(UploadResponse { url }))
}

/// Re-read every collection from the backend
pub async fn refresh_handler(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> AdminResult<LoadSummary> {
    require_admin(user(&auth), &state, AdminCapability::ModerateResources).await?;
    Ok(Json(state.directory.refresh().await?))
}
