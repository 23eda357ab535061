//! Resources domain - links to tools and templates owned by creators
//!
//! Key pieces:
//! - Row mapping to and from the backend wire shape (`data`)
//! - Moderation state machine, pure decision logic (`machines`)
//! - Query engine deriving visitor and admin views (`query`)
//! - Admin actions over the optimistic write protocol (`actions`)

pub mod actions;
pub mod catalog;
pub mod data;
pub mod events;
pub mod machines;
pub mod models;
pub mod query;

pub use actions::*;
pub use catalog::{
    suggestions, DashboardStats, Suggestion, CATEGORY_FILTERS, SUGGESTIONS, TRENDING_TAGS,
};
pub use data::{map_resource, NewResource, ResourcePatch};
pub use events::ResourceEvent;
pub use machines::{ModerationAction, ModerationDecision, ModerationMachine};
pub use models::{Category, Resource, ResourceHealth, ResourceStatus};
pub use query::{CategoryFilter, ResourceQuery, SortOrder, VisibleResources};
