/// Authorization module for the creator directory
///
/// Provides a fluent API for authorization checks:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, AdminCapability};
///
/// let grant = Actor::new(identity)
///     .can(AdminCapability::ModerateResources)
///     .check(deps)
///     .await?;
/// ```
///
/// Mutating actions take the resulting `AdminGrant` by reference, so an
/// unauthorized caller cannot reach them at all.

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, AdminGrant, CapabilityBuilder, HasAuthContext, Identity};
pub use capability::AdminCapability;
pub use errors::AuthError;
