// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (moderation, queries) lives in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseDataStore, BaseBlobStore)

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::common::Identity;

// =============================================================================
// Entity kinds (backend collections)
// =============================================================================

/// The three logical collections exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Creators,
    Resources,
    TrendingPrompts,
}

impl EntityKind {
    /// Backend table name
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Creators => "creators",
            EntityKind::Resources => "resources",
            EntityKind::TrendingPrompts => "trending_prompts",
        }
    }

    /// Human-readable singular label used in errors
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Creators => "Creator",
            EntityKind::Resources => "Resource",
            EntityKind::TrendingPrompts => "Trending prompt",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

// =============================================================================
// Data Store Trait (Infrastructure - system of record)
// =============================================================================

#[async_trait]
pub trait BaseDataStore: Send + Sync {
    /// Fetch every raw row of a collection (snake_case JSON objects)
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Value>>;

    /// Insert a record and return the identifier the store assigned
    async fn insert(&self, kind: EntityKind, record: Value) -> Result<String>;

    /// Update only the given fields of the row with `id`
    async fn update(&self, kind: EntityKind, id: &str, fields: Map<String, Value>) -> Result<()>;

    /// Hard-delete the row with `id`
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()>;
}

// =============================================================================
// Blob Store Trait (Infrastructure - object storage)
// =============================================================================

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Store `bytes` under `path` in `bucket` and return its public URL
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String>;
}

// =============================================================================
// Identity Provider Trait (Infrastructure - sessions)
// =============================================================================

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Resolve an access token to the signed-in user, if any
    async fn current_user(&self, access_token: &str) -> Result<Option<Identity>>;
}

// =============================================================================
// Client Storage Trait (Infrastructure - durable client-local key/value)
// =============================================================================

pub trait BaseClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
