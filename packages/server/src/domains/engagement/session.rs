//! Client session state
//!
//! Loaded once from client storage at session start and flushed back on
//! every change. Unreadable stored values fall back to their defaults.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, warn};

use super::gate::{EngagementGate, GateDecision, GateState};
use super::recent_searches::RecentSearches;
use super::theme::Theme;
use crate::common::{DirectoryError, DirectoryResult};
use crate::kernel::BaseClientStorage;

pub const RECENT_SEARCHES_KEY: &str = "nmd_recent_searches";
pub const THEME_KEY: &str = "nmd_theme";
pub const LAST_CLICK_DATE_KEY: &str = "nmd_last_click_date";
pub const CLICKS_KEY: &str = "nmd_clicks";

pub struct ClientSession {
    storage: Arc<dyn BaseClientStorage>,
    gate: EngagementGate,
    gate_state: GateState,
    recent_searches: RecentSearches,
    theme: Theme,
}

impl ClientSession {
    /// Read every key from `storage`
    pub fn load(storage: Arc<dyn BaseClientStorage>, daily_limit: u32) -> DirectoryResult<Self> {
        let recent_searches = match read(&*storage, RECENT_SEARCHES_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(terms) => RecentSearches::from_terms(terms),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable recent searches");
                    RecentSearches::new()
                }
            },
            None => RecentSearches::new(),
        };

        let theme = read(&*storage, THEME_KEY)?
            .map(|raw| Theme::parse_stored(&raw))
            .unwrap_or_default();

        let gate_state = GateState {
            last_action_date: read(&*storage, LAST_CLICK_DATE_KEY)?,
            count_today: read(&*storage, CLICKS_KEY)?
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0),
        };

        debug!(
            searches = recent_searches.terms().len(),
            theme = theme.as_str(),
            "Client session loaded"
        );

        Ok(Self {
            storage,
            gate: EngagementGate::new(daily_limit),
            gate_state,
            recent_searches,
            theme,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> DirectoryResult<()> {
        self.theme = theme;
        write(&*self.storage, THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&mut self) -> DirectoryResult<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn recent_searches(&self) -> &[String] {
        self.recent_searches.terms()
    }

    pub fn record_search(&mut self, term: &str) -> DirectoryResult<()> {
        if self.recent_searches.record(term) {
            self.flush_searches()?;
        }
        Ok(())
    }

    pub fn remove_search(&mut self, term: &str) -> DirectoryResult<()> {
        if self.recent_searches.remove(term) {
            self.flush_searches()?;
        }
        Ok(())
    }

    pub fn clear_searches(&mut self) -> DirectoryResult<()> {
        self.recent_searches = RecentSearches::new();
        self.storage
            .remove(RECENT_SEARCHES_KEY)
            .map_err(DirectoryError::Storage)
    }

    pub fn gate_state(&self) -> &GateState {
        &self.gate_state
    }

    pub fn daily_limit(&self) -> u32 {
        self.gate.limit()
    }

    /// Gate one unlock on the given local calendar day
    pub fn try_unlock(&mut self, today: NaiveDate) -> DirectoryResult<GateDecision> {
        let (next, decision) = self.gate.evaluate(&self.gate_state, today);

        if next != self.gate_state {
            // Count before date: a stale date only ever resets the quota
            write(&*self.storage, CLICKS_KEY, &next.count_today.to_string())?;
            if next.last_action_date != self.gate_state.last_action_date {
                if let Some(date) = &next.last_action_date {
                    write(&*self.storage, LAST_CLICK_DATE_KEY, date)?;
                }
            }
            self.gate_state = next;
        }

        debug!(decision = ?decision, count_today = self.gate_state.count_today, "Unlock evaluated");
        Ok(decision)
    }

    /// Gate one unlock today, by the local clock
    pub fn try_unlock_now(&mut self) -> DirectoryResult<GateDecision> {
        self.try_unlock(Local::now().date_naive())
    }

    fn flush_searches(&self) -> DirectoryResult<()> {
        let raw = serde_json::to_string(self.recent_searches.terms())
            .map_err(|e| DirectoryError::Storage(e.into()))?;
        write(&*self.storage, RECENT_SEARCHES_KEY, &raw)
    }
}

fn read(storage: &dyn BaseClientStorage, key: &str) -> DirectoryResult<Option<String>> {
    storage.get(key).map_err(DirectoryError::Storage)
}

fn write(storage: &dyn BaseClientStorage, key: &str, value: &str) -> DirectoryResult<()> {
    storage.set(key, value).map_err(DirectoryError::Storage)
}
