//! Resource read actions
//!
//! Snapshot the store and run the query engine over the copies, so no lock
//! is held while results are serialized.

use serde::Serialize;

use crate::common::{AdminCapability, AdminGrant, DirectoryError, DirectoryResult};
use crate::domains::creators::Creator;
use crate::domains::resources::catalog::DashboardStats;
use crate::domains::resources::models::{Resource, ResourceStatus};
use crate::domains::resources::query::{
    admin_resources, creator_resources, visible_creators, visible_resources, ResourceQuery,
};
use crate::store::EntityStore;

/// Visitor browse list for `query`
pub async fn browse_resources(store: &EntityStore, query: &ResourceQuery) -> Vec<Resource> {
    let resources = store.resources.snapshot().await;
    let creators = store.creators.snapshot().await;
    visible_resources(&resources, &creators, query).to_owned_vec()
}

/// Creators listed on the home page
pub async fn list_visible_creators(store: &EntityStore) -> Vec<Creator> {
    let creators = store.creators.snapshot().await;
    visible_creators(&creators).into_iter().cloned().collect()
}

/// A creator page: the profile plus its visible resources
#[derive(Debug, Clone, Serialize)]
pub struct CreatorProfile {
    pub creator: Creator,
    pub resources: Vec<Resource>,
}

/// Look a creator up by slug; unknown slugs are terminal not-found errors
pub async fn creator_profile(store: &EntityStore, slug: &str) -> DirectoryResult<CreatorProfile> {
    let creator = store
        .creators
        .find(|creator| creator.slug == slug)
        .await
        .ok_or_else(|| DirectoryError::not_found("Creator", slug))?;

    let resources = store.resources.snapshot().await;
    let owned = creator_resources(&resources, &creator.id)
        .into_iter()
        .cloned()
        .collect();

    Ok(CreatorProfile {
        creator,
        resources: owned,
    })
}

/// Moderation list for the admin dashboard
pub async fn list_admin_resources(
    store: &EntityStore,
    grant: &AdminGrant,
    status: Option<ResourceStatus>,
    term: &str,
) -> DirectoryResult<Vec<Resource>> {
    grant.ensure(AdminCapability::ModerateResources)?;

    let resources = store.resources.snapshot().await;
    let creators = store.creators.snapshot().await;
    Ok(admin_resources(&resources, &creators, status, term)
        .into_iter()
        .cloned()
        .collect())
}

/// Headline counters for the admin dashboard
pub async fn dashboard_stats(store: &EntityStore, grant: &AdminGrant) -> DirectoryResult<DashboardStats> {
    grant.ensure(AdminCapability::ModerateResources)?;

    let resources = store.resources.snapshot().await;
    Ok(DashboardStats::compute(&resources, store.prompts.len().await))
}
