//! Kernel module - infrastructure traits, adapters and dependencies.

pub mod backend_client;
pub mod client_storage;
pub mod deps;
pub mod identity_client;
pub mod storage_client;
pub mod test_dependencies;
pub mod traits;

pub use backend_client::{BackendClient, BackendConnection};
pub use client_storage::{FileClientStorage, MemoryClientStorage};
pub use deps::ServerDeps;
pub use identity_client::IdentityClient;
pub use storage_client::StorageClient;
pub use test_dependencies::TestDependencies;
pub use traits::*;
