//! Resource mutation actions
//!
//! Every write asks the moderation machine what the admin action means for
//! the resource's current state, then carries the decision out through the
//! optimistic write protocol. Events are emitted once the backend confirmed.

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::common::{
    AdminCapability, AdminGrant, CreatorId, DirectoryError, DirectoryResult, ResourceId,
};
use crate::domains::resources::data::{insert_record, NewResource, ResourcePatch};
use crate::domains::resources::events::ResourceEvent;
use crate::domains::resources::machines::{
    ModerationAction, ModerationDecision, ModerationMachine, ResourceOrigin,
};
use crate::domains::resources::models::{Resource, ResourceHealth};
use crate::kernel::ServerDeps;
use crate::store::{commit_create, commit_delete, commit_update, EntityStore};

/// Insert a resource straight to live, bypassing review
pub async fn insert_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    input: NewResource,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    let created = create_resource(store, deps, input, ResourceOrigin::Manual).await?;

    ResourceEvent::ResourceInserted {
        resource_id: created.id.clone(),
        creator_id: created.creator_id.clone(),
    }
    .emit();

    Ok(created)
}

/// Queue a scraped submission for review
pub async fn ingest_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    input: NewResource,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::IngestResources)?;

    let created = create_resource(store, deps, input, ResourceOrigin::Ingested).await?;

    ResourceEvent::ResourceSubmitted {
        resource_id: created.id.clone(),
        creator_id: created.creator_id.clone(),
    }
    .emit();

    Ok(created)
}

async fn create_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    input: NewResource,
    origin: ResourceOrigin,
) -> DirectoryResult<Resource> {
    ensure_creator_exists(store, &input.creator_id).await?;

    info!(creator_id = %input.creator_id, origin = ?origin, "Creating resource");

    let initial = ModerationMachine::initial_state(origin, input.health);
    let resource = Resource {
        id: ResourceId::new(""),
        creator_id: input.creator_id,
        title: input.title,
        description: input.description,
        category: input.category,
        tags: input.tags,
        thumbnail_url: input.thumbnail_url,
        date: Some(Utc::now()),
        url: input.url,
        is_hidden: initial.is_hidden,
        status: initial.status,
        health: initial.health,
    };
    let record = insert_record(&resource);

    commit_create(&store.resources, deps, resource, record).await
}

/// Resources must point at a creator the backend already knows
async fn ensure_creator_exists(store: &EntityStore, creator_id: &CreatorId) -> DirectoryResult<()> {
    if creator_id.is_temporary() {
        return Err(DirectoryError::NotPersisted {
            kind: "Creator",
            id: creator_id.to_string(),
        });
    }
    if !store.creators.contains(creator_id).await {
        return Err(DirectoryError::not_found("Creator", creator_id.as_str()));
    }
    Ok(())
}

/// Edit a resource's content fields
pub async fn update_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
    patch: ResourcePatch,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    info!(resource_id = %id, "Editing resource");

    let updated = commit_update(&store.resources, deps, id, |current| {
        let mut next = current.clone();
        patch.apply_to(&mut next);
        Ok((next, patch.to_wire()))
    })
    .await?;

    ResourceEvent::ResourceEdited {
        resource_id: id.clone(),
    }
    .emit();

    Ok(updated)
}

/// Record the link monitor's verdict
pub async fn set_resource_health(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
    health: ResourceHealth,
) -> DirectoryResult<Resource> {
    let patch = ResourcePatch {
        health: Some(health),
        ..Default::default()
    };
    update_resource(store, deps, grant, id, patch).await
}

/// Approve a resource, merging any edits made during review
///
/// Approving a resource that is already live only writes the edits; a
/// ghost hide stays in place.
pub async fn approve_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
    edits: Option<ResourcePatch>,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    info!(resource_id = %id, "Approving resource");

    let edits = edits.unwrap_or_default();
    let approved = commit_update(&store.resources, deps, id, |current| {
        let decision = ModerationMachine::decide(current, ModerationAction::Approve)?;
        let mut next = ModerationMachine::apply(current, decision);
        edits.apply_to(&mut next);

        let mut fields = edits.to_wire();
        fields.extend(workflow_changes(current, &next));
        Ok((next, fields))
    })
    .await?;

    ResourceEvent::ResourceApproved {
        resource_id: id.clone(),
    }
    .emit();

    Ok(approved)
}

/// Reject a pending submission; the row is deleted
pub async fn reject_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    info!(resource_id = %id, "Rejecting resource");

    let removed = commit_delete(&store.resources, deps, id, |current| {
        expect_purge(ModerationMachine::decide(current, ModerationAction::Reject)?)
    })
    .await?;

    ResourceEvent::ResourceRejected {
        resource_id: id.clone(),
    }
    .emit();

    Ok(removed)
}

/// Ghost hide: flip `is_hidden` without touching the status
pub async fn toggle_resource_hidden(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    let updated = commit_update(&store.resources, deps, id, |current| {
        let decision = ModerationMachine::decide(current, ModerationAction::ToggleHidden)?;
        let next = ModerationMachine::apply(current, decision);
        info!(resource_id = %current.id, is_hidden = next.is_hidden, "Toggling ghost hide");
        let fields = workflow_changes(current, &next);
        Ok((next, fields))
    })
    .await?;

    ResourceEvent::ResourceVisibilityChanged {
        resource_id: id.clone(),
        is_hidden: updated.is_hidden,
    }
    .emit();

    Ok(updated)
}

/// Hard-delete a published resource
pub async fn wipe_resource(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &ResourceId,
) -> DirectoryResult<Resource> {
    grant.ensure(AdminCapability::ModerateResources)?;

    info!(resource_id = %id, "Wiping resource");

    let removed = commit_delete(&store.resources, deps, id, |current| {
        expect_purge(ModerationMachine::decide(current, ModerationAction::Wipe)?)
    })
    .await?;

    ResourceEvent::ResourceWiped {
        resource_id: id.clone(),
    }
    .emit();

    Ok(removed)
}

fn expect_purge(decision: ModerationDecision) -> DirectoryResult<()> {
    match decision {
        ModerationDecision::Purge => Ok(()),
        other => Err(DirectoryError::Validation(format!(
            "expected a purge, machine decided {:?}",
            other
        ))),
    }
}

/// Wire fields for the workflow columns that differ between two states
fn workflow_changes(before: &Resource, after: &Resource) -> Map<String, Value> {
    let mut fields = Map::new();
    if before.status != after.status {
        fields.insert("status".into(), json!(after.status));
    }
    if before.is_hidden != after.is_hidden {
        fields.insert("is_hidden".into(), json!(after.is_hidden));
    }
    fields
}
