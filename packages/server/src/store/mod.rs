//! Entity store - per-session in-memory copies of every collection
//!
//! The backend is the system of record. The store holds the mapped entities
//! for one session and is mutated only through the optimistic write protocol
//! in [`optimistic`].

pub mod collection;
pub mod optimistic;

pub use collection::Collection;
pub use optimistic::{commit_create, commit_delete, commit_update};

use serde::{Deserialize, Serialize};

use crate::common::{CreatorMarker, Id, PromptMarker, ResourceMarker};
use crate::domains::creators::Creator;
use crate::domains::prompts::TrendingPrompt;
use crate::domains::resources::Resource;
use crate::kernel::EntityKind;

/// What to undo locally when a backend write fails
///
/// Failed creates always roll back. The policy only decides whether failed
/// updates and deletes restore the pre-mutation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// Restore the snapshot for every failed write
    #[default]
    All,
    /// Only remove failed creates; failed updates and deletes stay applied
    CreatesOnly,
}

impl RollbackPolicy {
    pub fn restores_updates(&self) -> bool {
        matches!(self, RollbackPolicy::All)
    }
}

impl std::fmt::Display for RollbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RollbackPolicy::All => write!(f, "all"),
            RollbackPolicy::CreatesOnly => write!(f, "creates_only"),
        }
    }
}

impl std::str::FromStr for RollbackPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RollbackPolicy::All),
            "creates_only" | "creates-only" => Ok(RollbackPolicy::CreatesOnly),
            other => Err(anyhow::anyhow!("Invalid rollback policy: {}", other)),
        }
    }
}

/// An entity the store can hold
pub trait Entity: Clone + Send + Sync + 'static {
    type Marker;

    /// Backend collection the entity lives in
    const KIND: EntityKind;

    fn id(&self) -> &Id<Self::Marker>;

    fn set_id(&mut self, id: Id<Self::Marker>);
}

impl Entity for Creator {
    type Marker = CreatorMarker;
    const KIND: EntityKind = EntityKind::Creators;

    fn id(&self) -> &Id<CreatorMarker> {
        &self.id
    }

    fn set_id(&mut self, id: Id<CreatorMarker>) {
        self.id = id;
    }
}

impl Entity for Resource {
    type Marker = ResourceMarker;
    const KIND: EntityKind = EntityKind::Resources;

    fn id(&self) -> &Id<ResourceMarker> {
        &self.id
    }

    fn set_id(&mut self, id: Id<ResourceMarker>) {
        self.id = id;
    }
}

impl Entity for TrendingPrompt {
    type Marker = PromptMarker;
    const KIND: EntityKind = EntityKind::TrendingPrompts;

    fn id(&self) -> &Id<PromptMarker> {
        &self.id
    }

    fn set_id(&mut self, id: Id<PromptMarker>) {
        self.id = id;
    }
}

/// The three collections of a session
#[derive(Default)]
pub struct EntityStore {
    pub creators: Collection<Creator>,
    pub resources: Collection<Resource>,
    pub prompts: Collection<TrendingPrompt>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every collection with freshly mapped rows
    pub async fn seed(
        &self,
        creators: Vec<Creator>,
        resources: Vec<Resource>,
        prompts: Vec<TrendingPrompt>,
    ) {
        self.creators.seed(creators).await;
        self.resources.seed(resources).await;
        self.prompts.seed(prompts).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_policy_parses_config_values() {
        assert_eq!("all".parse::<RollbackPolicy>().unwrap(), RollbackPolicy::All);
        assert_eq!(
            "CREATES_ONLY".parse::<RollbackPolicy>().unwrap(),
            RollbackPolicy::CreatesOnly
        );
        assert!("never".parse::<RollbackPolicy>().is_err());
        assert_eq!(RollbackPolicy::default(), RollbackPolicy::All);
    }
}
