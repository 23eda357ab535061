//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use directory_core::common::{CreatorId, PromptId, ResourceId};
//!
//! let creator_id = CreatorId::from("c1");
//! let resource_id = ResourceId::from("1");
//! let prompt_id = PromptId::from("p1");
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Creator entities (content-publishing profiles).
pub struct CreatorMarker;

/// Marker type for Resource entities (links to tools and templates).
pub struct ResourceMarker;

/// Marker type for TrendingPrompt entities.
pub struct PromptMarker;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Creator entities.
pub type CreatorId = Id<CreatorMarker>;

/// Typed ID for Resource entities.
pub type ResourceId = Id<ResourceMarker>;

/// Typed ID for TrendingPrompt entities.
pub type PromptId = Id<PromptMarker>;
