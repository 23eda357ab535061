use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::common::{Actor, AdminCapability, AdminGrant, AuthError, Identity};
use crate::server::app::AppState;

/// Signed-in user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub identity: Identity,
}

/// Middleware to resolve the session token and populate the auth user
///
/// This middleware does NOT block requests - it only extracts auth info.
/// Admin handlers turn the auth user into an `AdminGrant` with
/// `require_admin`.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request) {
        match state.directory.deps.identity.current_user(&token).await {
            Ok(Some(identity)) => {
                debug!(user_id = %identity.user_id, "Authenticated user");
                request.extensions_mut().insert(AuthUser { identity });
            }
            Ok(None) => debug!("Session token not recognized"),
            Err(e) => warn!(error = %e, "Identity lookup failed"),
        }
    }

    next.run(request).await
}

fn bearer_token(request: &Request) -> Option<String> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Issue an admin grant for `capability`, or fail with 401/403
pub async fn require_admin(
    auth_user: Option<&AuthUser>,
    state: &AppState,
    capability: AdminCapability,
) -> Result<AdminGrant, AuthError> {
    let user = auth_user.ok_or(AuthError::AuthenticationRequired)?;

    Actor::new(user.identity.clone())
        .can(capability)
        .check(&state.directory.deps)
        .await
}
