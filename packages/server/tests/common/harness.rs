//! Test harness over the in-memory backend doubles.
//!
//! Each test gets its own mock data store, seeded with a small catalog, a
//! loaded `Directory` bound to it, and a router sharing that directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use directory_core::common::{Actor, AdminCapability, AdminGrant, Identity};
use directory_core::domains::engagement::ClientSession;
use directory_core::kernel::test_dependencies::{MockDataStore, TEST_ADMIN_EMAIL};
use directory_core::kernel::{EntityKind, MemoryClientStorage, TestDependencies};
use directory_core::server::{build_app, AppState};
use directory_core::store::RollbackPolicy;
use directory_core::Directory;
use serde_json::Value;
use test_context::AsyncTestContext;
use tower::ServiceExt;

use super::fixtures::*;

pub const DAILY_LIMIT: u32 = 3;

/// Test harness that manages the doubles, the directory and the router.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let resources = ctx.directory().store.resources.snapshot().await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub deps: TestDependencies,
    pub state: AppState,
    pub storage: Arc<MemoryClientStorage>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create test harness")
    }
}

/// Seed rows: two visible creators, one hidden, and a pending/live mix
pub fn seeded_store() -> MockDataStore {
    MockDataStore::new()
        .with_rows(
            EntityKind::Creators,
            vec![
                creator_row("c1", "Ada Lovelace"),
                creator_row("c2", "Grace Hopper"),
                hidden_creator_row("c3", "Shadow Maker"),
            ],
        )
        .with_rows(
            EntityKind::Resources,
            vec![
                resource_row("r1", "c1", "Prompting Guide", "live"),
                resource_row("r2", "c1", "Agent Starter Kit", "pending"),
                resource_row("r3", "c2", "Compiler Notes", "live"),
                resource_row("r4", "c3", "Secret Sauce", "live"),
            ],
        )
        .with_rows(EntityKind::TrendingPrompts, vec![prompt_row("p1", "Lighthouse")])
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        Self::with_deps(TestDependencies::with_data_store(seeded_store())).await
    }

    pub async fn with_policy(policy: RollbackPolicy) -> Result<Self> {
        Self::with_deps(TestDependencies::with_data_store(seeded_store()).rollback_policy(policy))
            .await
    }

    pub async fn with_deps(deps: TestDependencies) -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let directory = Directory::load(deps.server_deps())
            .await
            .context("Failed to load directory")?;

        let storage = Arc::new(MemoryClientStorage::new());
        let session = ClientSession::load(storage.clone(), DAILY_LIMIT)
            .context("Failed to load client session")?;

        Ok(Self {
            deps,
            state: AppState::new(directory, session),
            storage,
        })
    }

    pub fn directory(&self) -> &Directory {
        &self.state.directory
    }

    /// Grant for the seeded admin
    pub async fn admin_grant(&self) -> AdminGrant {
        Actor::new(Identity {
            user_id: "admin-1".to_string(),
            email: Some(TEST_ADMIN_EMAIL.to_string()),
        })
        .can(AdminCapability::FullAdmin)
        .check(&self.directory().deps)
        .await
        .expect("seeded admin must pass the admin check")
    }

    pub fn router(&self) -> Router {
        build_app(self.state.clone())
    }

    /// Send one request through a fresh router and decode the JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }
}
