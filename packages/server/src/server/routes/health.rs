use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::EntityKind;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    backend: BackendHealth,
    store: StoreCounts,
}

#[derive(Serialize)]
pub struct BackendHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct StoreCounts {
    creators: usize,
    resources: usize,
    prompts: usize,
}

/// Health check endpoint
///
/// Checks:
/// - Backend connectivity and responsiveness
/// - Entity store sizes
///
/// Returns 200 OK if the backend answered, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let directory = &state.directory;

    let backend = match tokio::time::timeout(
        Duration::from_secs(5),
        directory.deps.data_store.fetch_all(EntityKind::Creators),
    )
    .await
    {
        Ok(Ok(_)) => BackendHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => BackendHealth {
            status: "error".to_string(),
            error: Some(format!("Read failed: {}", e)),
        },
        Err(_) => BackendHealth {
            status: "error".to_string(),
            error: Some("Read timeout (>5s)".to_string()),
        },
    };

    let store = StoreCounts {
        creators: directory.store.creators.len().await,
        resources: directory.store.resources.len().await,
        prompts: directory.store.prompts.len().await,
    };

    let is_healthy = backend.status == "ok";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            backend,
            store,
        }),
    )
}
