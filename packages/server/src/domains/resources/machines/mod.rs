//! Resource moderation state machine
//!
//! Pure decision logic - NO IO, only state transitions. Actions ask the
//! machine what an admin action means for a resource in its current state,
//! then carry out the resulting decision through the optimistic write
//! protocol.
//!
//! ```text
//!   ingest ──▶ PENDING ──approve──▶ LIVE ◀──approve (edits only)
//!                 │                  │  ╲
//!               reject             wipe  ghost hide (toggle is_hidden)
//!                 ▼                  ▼
//!             REJECTED (row deleted, terminal)
//!   manual insert ─────────────────▶ LIVE
//! ```
//!
//! `broken` is a status the link monitor sets. The machine never moves a
//! resource into or out of it, but a broken resource can still be hidden or
//! wiped.

use crate::common::DirectoryError;
use crate::domains::resources::models::{Resource, ResourceHealth, ResourceStatus};

/// Admin actions the machine arbitrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    ToggleHidden,
    Wipe,
}

impl ModerationAction {
    pub fn verb(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
            ModerationAction::ToggleHidden => "hide",
            ModerationAction::Wipe => "wipe",
        }
    }
}

/// What the action resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    /// Set `status = live`, `is_hidden = false` and merge pending edits
    Publish,
    /// Merge pending edits only; status and `is_hidden` untouched
    ApplyEdits,
    /// Set `is_hidden` to the given value; status untouched
    SetHidden(bool),
    /// Hard-delete the resource
    Purge,
}

/// How a resource entered the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOrigin {
    /// Scraped submission awaiting review
    Ingested,
    /// Admin insertion that bypasses review
    Manual,
}

/// Initial workflow fields for a new resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialState {
    pub status: ResourceStatus,
    pub health: ResourceHealth,
    pub is_hidden: bool,
}

/// Resource moderation machine
pub struct ModerationMachine;

impl ModerationMachine {
    /// Decide what `action` means for `resource`
    pub fn decide(
        resource: &Resource,
        action: ModerationAction,
    ) -> Result<ModerationDecision, DirectoryError> {
        use ModerationAction::*;
        use ResourceStatus::*;

        match (action, resource.status) {
            (Approve, Pending) => Ok(ModerationDecision::Publish),
            // Re-approving keeps a ghost hide in place
            (Approve, Live) => Ok(ModerationDecision::ApplyEdits),
            (Reject, Pending) => Ok(ModerationDecision::Purge),
            (ToggleHidden, Live | Broken) => {
                Ok(ModerationDecision::SetHidden(!resource.is_hidden))
            }
            (Wipe, Live | Broken) => Ok(ModerationDecision::Purge),
            (action, status) => Err(DirectoryError::InvalidTransition {
                action: action.verb(),
                status: status.to_string(),
            }),
        }
    }

    /// Starting state for a resource created through `origin`
    ///
    /// Ingested resources keep the health the ingestion process reported.
    pub fn initial_state(origin: ResourceOrigin, reported_health: Option<ResourceHealth>) -> InitialState {
        match origin {
            ResourceOrigin::Ingested => InitialState {
                status: ResourceStatus::Pending,
                health: reported_health.unwrap_or_default(),
                is_hidden: false,
            },
            ResourceOrigin::Manual => InitialState {
                status: ResourceStatus::Live,
                health: ResourceHealth::Ok,
                is_hidden: false,
            },
        }
    }

    /// Apply a non-purge decision to a copy of `resource`
    pub fn apply(resource: &Resource, decision: ModerationDecision) -> Resource {
        let mut next = resource.clone();
        match decision {
            ModerationDecision::Publish => {
                next.status = ResourceStatus::Live;
                next.is_hidden = false;
            }
            ModerationDecision::SetHidden(hidden) => {
                next.is_hidden = hidden;
            }
            ModerationDecision::ApplyEdits | ModerationDecision::Purge => {}
        }
        next
    }
}
