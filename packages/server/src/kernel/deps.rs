//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! domain action. All external collaborators use trait abstractions so tests
//! can swap in the doubles from `test_dependencies`.

use anyhow::Result;
use std::sync::Arc;

use crate::common::auth::HasAuthContext;
use crate::config::Config;
use crate::kernel::{
    BackendClient, BackendConnection, BaseBlobStore, BaseDataStore, BaseIdentityProvider,
    IdentityClient, StorageClient,
};
use crate::store::RollbackPolicy;

/// Dependencies accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    /// System of record for creators, resources and prompts
    pub data_store: Arc<dyn BaseDataStore>,
    pub blob_store: Arc<dyn BaseBlobStore>,
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub admin_identifiers: Vec<String>,
    /// What to undo locally when a backend write fails
    pub rollback_policy: RollbackPolicy,
}

impl ServerDeps {
    pub fn new(
        data_store: Arc<dyn BaseDataStore>,
        blob_store: Arc<dyn BaseBlobStore>,
        identity: Arc<dyn BaseIdentityProvider>,
        admin_identifiers: Vec<String>,
        rollback_policy: RollbackPolicy,
    ) -> Self {
        Self {
            data_store,
            blob_store,
            identity,
            admin_identifiers,
            rollback_policy,
        }
    }

    /// Wire the hosted backend clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let connection =
            BackendConnection::new(&config.backend_url, config.backend_api_key.clone())?;

        Ok(Self::new(
            Arc::new(BackendClient::new(connection.clone())),
            Arc::new(StorageClient::new(connection.clone())),
            Arc::new(IdentityClient::new(connection)),
            config.admin_emails.clone(),
            config.rollback_policy,
        ))
    }
}

impl HasAuthContext for ServerDeps {
    fn admin_identifiers(&self) -> &[String] {
        &self.admin_identifiers
    }
}
