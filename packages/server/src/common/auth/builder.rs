use serde::{Deserialize, Serialize};

use super::{AdminCapability, AuthError};

/// A signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::new(identity)
///     .can(AdminCapability::ModerateResources)
///     .check(deps)
///     .await?;
/// ```
pub struct Actor {
    identity: Identity,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// The identity must come from the identity provider; nothing here
    /// re-validates the session token.
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: AdminCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            identity: self.identity,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    identity: Identity,
    capability: AdminCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check and issue a grant on success
    pub async fn check<D>(self, deps: &D) -> Result<AdminGrant, AuthError>
    where
        D: HasAuthContext,
    {
        check_admin_permission(&self.identity, deps)?;

        Ok(AdminGrant {
            user_id: self.identity.user_id,
            capability: self.capability,
        })
    }
}

/// Proof that an admin check passed for a capability
///
/// Only `CapabilityBuilder::check` can construct one.
#[derive(Debug, Clone)]
pub struct AdminGrant {
    user_id: String,
    capability: AdminCapability,
}

impl AdminGrant {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn capability(&self) -> AdminCapability {
        self.capability
    }

    /// Fail unless this grant covers `required`
    pub fn ensure(&self, required: AdminCapability) -> Result<(), AuthError> {
        if self.capability.covers(required) {
            Ok(())
        } else {
            Err(AuthError::CapabilityNotGranted {
                granted: self.capability,
                required,
            })
        }
    }
}

/// Trait for dependencies that can perform auth checks
pub trait HasAuthContext: Send + Sync {
    /// Email addresses allowed to administer the directory
    fn admin_identifiers(&self) -> &[String];
}

/// Core permission check function
///
/// An identity is an admin when its email appears in the configured admin
/// list (case-insensitive). Identities without an email are never admins.
fn check_admin_permission<D>(identity: &Identity, deps: &D) -> Result<(), AuthError>
where
    D: HasAuthContext,
{
    let Some(email) = identity.email.as_deref() else {
        return Err(AuthError::NotAnAdmin {
            email: format!("user {}", identity.user_id),
        });
    };

    let is_admin = deps
        .admin_identifiers()
        .iter()
        .any(|admin| admin.eq_ignore_ascii_case(email.trim()));

    if !is_admin {
        return Err(AuthError::NotAnAdmin {
            email: email.to_string(),
        });
    }

    Ok(())
}
