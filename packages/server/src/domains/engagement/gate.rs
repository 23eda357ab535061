//! Engagement gate - daily quota on outbound unlocks
//!
//! Pure decision logic - NO IO. The session persists the state this returns.
//! The gate is a soft nudge for anonymous visitors, not access control.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day key format; two days are the same iff their keys are equal
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Persisted counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateState {
    pub last_action_date: Option<String>,
    pub count_today: u32,
}

/// Outcome of a gated action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateDecision {
    Allowed { remaining: u32 },
    /// Show the limit dialog instead of opening the link
    Limited,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EngagementGate {
    limit: u32,
}

impl EngagementGate {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Evaluate one action on `today`, returning the state to persist
    pub fn evaluate(&self, state: &GateState, today: NaiveDate) -> (GateState, GateDecision) {
        let today_key = today.format(DAY_KEY_FORMAT).to_string();

        let mut next = state.clone();
        if next.last_action_date.as_deref() != Some(today_key.as_str()) {
            next.last_action_date = Some(today_key);
            next.count_today = 0;
        }

        if next.count_today >= self.limit {
            return (next, GateDecision::Limited);
        }

        next.count_today += 1;
        let remaining = self.limit - next.count_today;
        (next, GateDecision::Allowed { remaining })
    }
}
