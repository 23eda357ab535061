//! Engagement domain - visitor-side session state
//!
//! The daily unlock gate, recent searches and theme preference. All of it is
//! advisory client state held in an explicit `ClientSession`.

pub mod gate;
pub mod recent_searches;
pub mod session;
pub mod theme;

pub use gate::{EngagementGate, GateDecision, GateState};
pub use recent_searches::{RecentSearches, MAX_RECENT_SEARCHES};
pub use session::ClientSession;
pub use theme::Theme;
