//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::directory::Directory;
use crate::domains::engagement::ClientSession;
use crate::server::middleware::session_auth_middleware;
use crate::server::routes::{admin, health_handler, public, session};

/// Header carrying the original file name on uploads
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    /// Visitor session of the local client
    pub session: Arc<Mutex<ClientSession>>,
}

impl AppState {
    pub fn new(directory: Directory, session: ClientSession) -> Self {
        Self {
            directory: Arc::new(directory),
            session: Arc::new(Mutex::new(session)),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(FILE_NAME_HEADER),
        ]);

    let admin_routes = Router::new()
        .route("/stats", get(admin::stats_handler))
        .route(
            "/resources",
            get(admin::list_resources_handler).post(admin::insert_resource_handler),
        )
        .route("/resources/ingest", post(admin::ingest_resource_handler))
        .route(
            "/resources/:id",
            patch(admin::update_resource_handler).delete(admin::wipe_resource_handler),
        )
        .route("/resources/:id/approve", post(admin::approve_resource_handler))
        .route("/resources/:id/reject", post(admin::reject_resource_handler))
        .route("/resources/:id/hide", post(admin::hide_resource_handler))
        .route("/resources/:id/health", post(admin::set_health_handler))
        .route("/creators", post(admin::create_creator_handler))
        .route("/creators/:id", patch(admin::update_creator_handler))
        .route("/creators/:id/verify", post(admin::verify_creator_handler))
        .route("/creators/:id/hide", post(admin::hide_creator_handler))
        .route("/prompts", post(admin::create_prompt_handler))
        .route("/prompts/:id", delete(admin::delete_prompt_handler))
        .route("/uploads/:bucket", post(admin::upload_handler))
        .route("/refresh", post(admin::refresh_handler));

    let session_routes = Router::new()
        .route("/", get(session::session_handler))
        .route("/unlock", post(session::unlock_handler))
        .route(
            "/searches",
            post(session::record_search_handler)
                .delete(session::remove_search_handler),
        )
        .route("/theme", put(session::set_theme_handler));

    Router::new()
        .route("/health", get(health_handler))
        .route("/resources", get(public::list_resources_handler))
        .route("/creators", get(public::list_creators_handler))
        .route("/creators/:slug", get(public::creator_profile_handler))
        .route("/prompts", get(public::list_prompts_handler))
        .route("/suggestions", get(public::suggestions_handler))
        .nest("/admin", admin_routes)
        .nest("/session", session_routes)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
