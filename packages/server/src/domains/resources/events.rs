//! Resource events - FACT EVENTS ONLY
//!
//! Events are immutable facts about what happened. They are emitted after the
//! backend confirmed the write and land in the structured log.

use crate::common::{CreatorId, ResourceId};

/// Resource domain events - FACT EVENTS ONLY
#[derive(Debug, Clone)]
pub enum ResourceEvent {
    /// Resource was created by an admin, straight to live
    ResourceInserted {
        resource_id: ResourceId,
        creator_id: CreatorId,
    },

    /// Scraped submission entered the pending queue
    ResourceSubmitted {
        resource_id: ResourceId,
        creator_id: CreatorId,
    },

    /// Resource was approved (status → live)
    ResourceApproved { resource_id: ResourceId },

    /// Pending resource was rejected and deleted
    ResourceRejected { resource_id: ResourceId },

    /// Ghost hide toggled
    ResourceVisibilityChanged {
        resource_id: ResourceId,
        is_hidden: bool,
    },

    /// Resource fields were edited
    ResourceEdited { resource_id: ResourceId },

    /// Live resource was wiped
    ResourceWiped { resource_id: ResourceId },
}

impl ResourceEvent {
    /// Record the event in the structured log
    pub fn emit(self) {
        tracing::info!(event = ?self, "Resource event");
    }
}
