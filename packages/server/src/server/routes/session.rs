//! Visitor session routes: theme, recent searches and the daily unlock gate

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::DirectoryError;
use crate::domains::engagement::{ClientSession, GateDecision, GateState, Theme};
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub theme: Theme,
    pub recent_searches: Vec<String>,
    pub gate: GateState,
    pub daily_limit: u32,
}

impl From<&ClientSession> for SessionView {
    fn from(session: &ClientSession) -> Self {
        Self {
            theme: session.theme(),
            recent_searches: session.recent_searches().to_vec(),
            gate: session.gate_state().clone(),
            daily_limit: session.daily_limit(),
        }
    }
}

pub async fn session_handler(Extension(state): Extension<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}

/// Spend one of today's unlocks
pub async fn unlock_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<GateDecision>, DirectoryError> {
    let mut session = state.session.lock().await;
    Ok(Json(session.try_unlock_now()?))
}

#[derive(Debug, Deserialize)]
pub struct SearchTerm {
    pub term: String,
}

pub async fn record_search_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<SearchTerm>,
) -> Result<Json<SessionView>, DirectoryError> {
    let mut session = state.session.lock().await;
    session.record_search(&body.term)?;
    Ok(Json(SessionView::from(&*session)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoveSearchParams {
    /// Term to forget; when absent every recent search is cleared
    pub term: Option<String>,
}

pub async fn remove_search_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<RemoveSearchParams>,
) -> Result<Json<SessionView>, DirectoryError> {
    let mut session = state.session.lock().await;
    match params.term {
        Some(term) => session.remove_search(&term)?,
        None => session.clear_searches()?,
    }
    Ok(Json(SessionView::from(&*session)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeChange {
    /// Explicit theme; when absent the current one is toggled
    pub theme: Option<Theme>,
}

pub async fn set_theme_handler(
    Extension(state): Extension<AppState>,
    Json(change): Json<ThemeChange>,
) -> Result<Json<SessionView>, DirectoryError> {
    let mut session = state.session.lock().await;
    match change.theme {
        Some(theme) => session.set_theme(theme)?,
        None => {
            session.toggle_theme()?;
        }
    }
    Ok(Json(SessionView::from(&*session)))
}
