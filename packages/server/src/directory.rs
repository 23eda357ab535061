//! Directory - one session's entity store bound to its collaborators
//!
//! The loader fetches every collection, maps the raw rows and seeds the
//! store. Everything else reads from or writes through the store.

use serde::Serialize;
use tracing::info;

use crate::common::{DirectoryError, DirectoryResult};
use crate::domains::creators::map_creator;
use crate::domains::prompts::map_prompt;
use crate::domains::resources::map_resource;
use crate::kernel::{EntityKind, ServerDeps};
use crate::store::EntityStore;

/// Row counts after a (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub creators: usize,
    pub resources: usize,
    pub prompts: usize,
}

pub struct Directory {
    pub store: EntityStore,
    pub deps: ServerDeps,
}

impl Directory {
    /// A directory with an empty store; call `refresh` to populate it
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            store: EntityStore::new(),
            deps,
        }
    }

    /// Build and populate a directory from the backend
    pub async fn load(deps: ServerDeps) -> DirectoryResult<Self> {
        let directory = Self::new(deps);
        directory.refresh().await?;
        Ok(directory)
    }

    /// Replace the store contents with a fresh read of every collection
    ///
    /// On failure the store keeps its previous contents.
    pub async fn refresh(&self) -> DirectoryResult<LoadSummary> {
        let data_store = &self.deps.data_store;
        let (creator_rows, resource_rows, prompt_rows) = tokio::try_join!(
            data_store.fetch_all(EntityKind::Creators),
            data_store.fetch_all(EntityKind::Resources),
            data_store.fetch_all(EntityKind::TrendingPrompts),
        )
        .map_err(DirectoryError::Read)?;

        let creators: Vec<_> = creator_rows.iter().map(map_creator).collect();
        let resources: Vec<_> = resource_rows.iter().map(map_resource).collect();
        let prompts: Vec<_> = prompt_rows.iter().map(map_prompt).collect();

        let summary = LoadSummary {
            creators: creators.len(),
            resources: resources.len(),
            prompts: prompts.len(),
        };
        self.store.seed(creators, resources, prompts).await;

        info!(
            creators = summary.creators,
            resources = summary.resources,
            prompts = summary.prompts,
            "Directory loaded"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockDataStore;
    use crate::kernel::TestDependencies;
    use serde_json::json;

    #[tokio::test]
    async fn load_maps_every_collection() {
        let data_store = MockDataStore::new()
            .with_rows(EntityKind::Creators, vec![json!({ "id": "c1", "slug": "sarah" })])
            .with_rows(
                EntityKind::Resources,
                vec![json!({ "id": 1, "creator_id": "c1", "status": "live" })],
            )
            .with_rows(EntityKind::TrendingPrompts, vec![json!({ "id": "p1", "type": "video" })]);
        let test_deps = TestDependencies::with_data_store(data_store);

        let directory = Directory::load(test_deps.server_deps()).await.unwrap();

        assert_eq!(directory.store.creators.len().await, 1);
        assert_eq!(directory.store.resources.snapshot().await[0].id.as_str(), "1");
        assert_eq!(directory.store.prompts.len().await, 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_contents() {
        let data_store = MockDataStore::new()
            .with_rows(EntityKind::Creators, vec![json!({ "id": "c1", "slug": "sarah" })]);
        let test_deps = TestDependencies::with_data_store(data_store);
        let directory = Directory::load(test_deps.server_deps()).await.unwrap();

        test_deps.data_store.fail_fetches(true);
        let result = directory.refresh().await;

        assert!(matches!(result, Err(DirectoryError::Read(_))));
        assert_eq!(directory.store.creators.len().await, 1);
    }
}
