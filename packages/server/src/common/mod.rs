// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod lenient;

pub use auth::{Actor, AdminCapability, AdminGrant, AuthError, HasAuthContext, Identity};
pub use entity_ids::*;
pub use error::{DirectoryError, DirectoryResult};
pub use id::{Id, TEMPORARY_ID_PREFIX};
