use thiserror::Error;

use super::AdminCapability;

/// Authorization errors for the directory admin surface
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Sign in to use the admin dashboard")]
    AuthenticationRequired,

    #[error("{email} is not a directory admin")]
    NotAnAdmin { email: String },

    #[error("Grant for {granted:?} does not cover {required:?}")]
    CapabilityNotGranted {
        granted: AdminCapability,
        required: AdminCapability,
    },
}
