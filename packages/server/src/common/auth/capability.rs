/// Capabilities in the creator directory
///
/// Every capability is admin-only; the split exists so a grant can be scoped
/// to the surface that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Approve, reject, hide, wipe and edit resources
    ModerateResources,

    /// Push scraped submissions into the pending queue
    IngestResources,

    /// Create and edit creator profiles
    ManageCreators,

    /// Create and delete trending prompts
    ManagePrompts,

    /// Upload avatars and thumbnails
    UploadMedia,

    /// Full admin access to all operations
    FullAdmin,
}

impl AdminCapability {
    /// Whether a grant issued for `self` covers `required`
    pub fn covers(&self, required: AdminCapability) -> bool {
        *self == AdminCapability::FullAdmin || *self == required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_admin_covers_everything() {
        assert!(AdminCapability::FullAdmin.covers(AdminCapability::UploadMedia));
        assert!(AdminCapability::FullAdmin.covers(AdminCapability::ModerateResources));
    }

    #[test]
    fn scoped_capability_covers_only_itself() {
        assert!(AdminCapability::ManagePrompts.covers(AdminCapability::ManagePrompts));
        assert!(!AdminCapability::ManagePrompts.covers(AdminCapability::ManageCreators));
    }
}
