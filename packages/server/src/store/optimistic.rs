//! Optimistic write protocol
//!
//! Every admin mutation follows the same three steps:
//!
//! 1. apply the new state to the local collection immediately,
//! 2. issue the matching backend write,
//! 3. reconcile: swap temporary ids on create success, roll back on failure.
//!
//! Failed creates are always removed. Failed updates and deletes are restored
//! only when the deps carry [`RollbackPolicy::All`](super::RollbackPolicy).

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::{Collection, Entity};
use crate::common::{DirectoryError, DirectoryResult, Id};
use crate::kernel::ServerDeps;

/// Insert `entity` under a temporary id, then commit `record` to the backend
///
/// Returns the entity carrying the store-assigned id.
pub async fn commit_create<T: Entity>(
    collection: &Collection<T>,
    deps: &ServerDeps,
    mut entity: T,
    record: Value,
) -> DirectoryResult<T> {
    let temporary_id = Id::<T::Marker>::temporary();
    entity.set_id(temporary_id.clone());
    collection.prepend(entity.clone()).await;

    match deps.data_store.insert(T::KIND, record).await {
        Ok(assigned) => {
            let assigned_id = Id::<T::Marker>::new(assigned);
            if !collection.replace_id(&temporary_id, assigned_id.clone()).await {
                warn!(
                    kind = %T::KIND,
                    temporary_id = %temporary_id,
                    "Created entity left the store before reconciliation"
                );
            }
            debug!(kind = %T::KIND, id = %assigned_id, "Create committed");
            entity.set_id(assigned_id);
            Ok(entity)
        }
        Err(e) => {
            error!(kind = %T::KIND, error = %e, "Create failed, rolling back");
            collection.remove(&temporary_id).await;
            Err(DirectoryError::Write(e))
        }
    }
}

/// Apply `change` to the entity with `id`, then send the returned fields
///
/// `change` sees the current entity and returns its next state along with
/// the wire payload. When the payload is empty nothing is sent.
pub async fn commit_update<T, F>(
    collection: &Collection<T>,
    deps: &ServerDeps,
    id: &Id<T::Marker>,
    change: F,
) -> DirectoryResult<T>
where
    T: Entity,
    F: FnOnce(&T) -> DirectoryResult<(T, Map<String, Value>)>,
{
    ensure_persisted::<T>(id)?;

    let (previous, next, fields) = {
        let mut items = collection.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| DirectoryError::not_found(T::KIND.label(), id.as_str()))?;
        let previous = slot.clone();
        let (next, fields) = change(&previous)?;
        *slot = next.clone();
        (previous, next, fields)
    };

    if fields.is_empty() {
        debug!(kind = %T::KIND, id = %id, "Nothing to write");
        return Ok(next);
    }

    match deps.data_store.update(T::KIND, id.as_str(), fields).await {
        Ok(()) => Ok(next),
        Err(e) => {
            error!(kind = %T::KIND, id = %id, error = %e, "Update failed");
            if deps.rollback_policy.restores_updates() {
                collection.replace(previous).await;
            }
            Err(DirectoryError::Write(e))
        }
    }
}

/// Remove the entity with `id` once `guard` accepts it, then delete remotely
pub async fn commit_delete<T, G>(
    collection: &Collection<T>,
    deps: &ServerDeps,
    id: &Id<T::Marker>,
    guard: G,
) -> DirectoryResult<T>
where
    T: Entity,
    G: FnOnce(&T) -> DirectoryResult<()>,
{
    ensure_persisted::<T>(id)?;

    let (index, removed) = {
        let mut items = collection.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DirectoryError::not_found(T::KIND.label(), id.as_str()))?;
        guard(&items[index])?;
        (index, items.remove(index))
    };

    match deps.data_store.delete(T::KIND, id.as_str()).await {
        Ok(()) => Ok(removed),
        Err(e) => {
            error!(kind = %T::KIND, id = %id, error = %e, "Delete failed");
            if deps.rollback_policy.restores_updates() {
                collection.restore(index, removed).await;
            }
            Err(DirectoryError::Write(e))
        }
    }
}

fn ensure_persisted<T: Entity>(id: &Id<T::Marker>) -> DirectoryResult<()> {
    if id.is_temporary() {
        return Err(DirectoryError::NotPersisted {
            kind: T::KIND.label(),
            id: id.to_string(),
        });
    }
    Ok(())
}
