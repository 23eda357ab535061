use thiserror::Error;

use super::auth::AuthError;

/// Errors surfaced by directory operations.
///
/// Infrastructure adapters report `anyhow::Error`; actions wrap those into the
/// variant matching where the failure happened so callers can show a simple
/// notification without inspecting the cause.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Cannot {action} a {status} resource")]
    InvalidTransition {
        action: &'static str,
        status: String,
    },

    #[error("{kind} {id} is still being created")]
    NotPersisted { kind: &'static str, id: String },

    #[error("Slug already taken: {0}")]
    SlugTaken(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Backend read failed: {0:#}")]
    Read(anyhow::Error),

    #[error("Backend write failed: {0:#}")]
    Write(anyhow::Error),

    #[error("Upload failed: {0:#}")]
    Upload(anyhow::Error),

    #[error("Client storage error: {0:#}")]
    Storage(anyhow::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DirectoryError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
