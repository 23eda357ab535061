//! Mapping of directory errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::common::{AuthError, DirectoryError};

impl DirectoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            DirectoryError::InvalidTransition { .. }
            | DirectoryError::NotPersisted { .. }
            | DirectoryError::SlugTaken(_) => StatusCode::CONFLICT,
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::Read(_) | DirectoryError::Write(_) | DirectoryError::Upload(_) => {
                StatusCode::BAD_GATEWAY
            }
            DirectoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DirectoryError::Auth(e) => e.status_code(),
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AuthError::NotAnAdmin { .. } | AuthError::CapabilityNotGranted { .. } => {
                StatusCode::FORBIDDEN
            }
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        DirectoryError::from(self).into_response()
    }
}
