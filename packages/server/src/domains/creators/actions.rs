//! Creator mutation actions

use tracing::info;

use super::data::{insert_record, CreatorPatch, NewCreator};
use super::models::{slugify, Creator, Socials};
use crate::common::{AdminCapability, AdminGrant, CreatorId, DirectoryError, DirectoryResult};
use crate::kernel::ServerDeps;
use crate::store::{commit_create, commit_update, EntityStore};

/// Create a creator profile
///
/// The slug is derived from the display name and must not collide with an
/// existing profile.
pub async fn create_creator(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    input: NewCreator,
) -> DirectoryResult<Creator> {
    grant.ensure(AdminCapability::ManageCreators)?;

    let slug = slugify(&input.display_name);
    if slug.is_empty() {
        return Err(DirectoryError::Validation(
            "display name is required".to_string(),
        ));
    }
    if store.creators.find(|creator| creator.slug == slug).await.is_some() {
        return Err(DirectoryError::SlugTaken(slug));
    }

    info!(slug = %slug, "Creating creator");

    let creator = Creator {
        id: CreatorId::new(""),
        slug,
        username: input.username.trim().to_string(),
        display_name: input.display_name.trim().to_string(),
        bio: input.bio,
        profile_pic_url: input.profile_pic_url,
        niche: input.niche,
        is_verified: false,
        is_hidden: false,
        followers_count: 0,
        socials: Socials::default(),
    };
    let record = insert_record(&creator);

    commit_create(&store.creators, deps, creator, record).await
}

/// Apply a partial edit to a creator
pub async fn update_creator(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &CreatorId,
    patch: CreatorPatch,
) -> DirectoryResult<Creator> {
    grant.ensure(AdminCapability::ManageCreators)?;

    info!(creator_id = %id, "Updating creator");

    commit_update(&store.creators, deps, id, |current| {
        let mut next = current.clone();
        patch.apply_to(&mut next);
        Ok((next, patch.to_wire()))
    })
    .await
}

/// Flip the verification badge
pub async fn toggle_creator_verified(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &CreatorId,
) -> DirectoryResult<Creator> {
    grant.ensure(AdminCapability::ManageCreators)?;

    commit_update(&store.creators, deps, id, |current| {
        let patch = CreatorPatch {
            is_verified: Some(!current.is_verified),
            ..Default::default()
        };
        let mut next = current.clone();
        patch.apply_to(&mut next);
        info!(creator_id = %current.id, is_verified = next.is_verified, "Toggling verification");
        Ok((next, patch.to_wire()))
    })
    .await
}

/// Flip whether the profile is hidden from visitors
pub async fn toggle_creator_hidden(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &CreatorId,
) -> DirectoryResult<Creator> {
    grant.ensure(AdminCapability::ManageCreators)?;

    commit_update(&store.creators, deps, id, |current| {
        let patch = CreatorPatch {
            is_hidden: Some(!current.is_hidden),
            ..Default::default()
        };
        let mut next = current.clone();
        patch.apply_to(&mut next);
        info!(creator_id = %current.id, is_hidden = next.is_hidden, "Toggling creator visibility");
        Ok((next, patch.to_wire()))
    })
    .await
}
