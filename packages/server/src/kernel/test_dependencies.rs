// TestDependencies - mock implementations for testing
//
// Provides in-memory doubles for every collaborator so actions and routes can
// run without a hosted backend. Failures can be injected per operation.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use super::{BaseBlobStore, BaseDataStore, BaseIdentityProvider, EntityKind, ServerDeps};
use crate::common::Identity;
use crate::store::RollbackPolicy;

// =============================================================================
// Mock Data Store
// =============================================================================

/// A write the mock store received
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Insert { kind: EntityKind, record: Value },
    Update {
        kind: EntityKind,
        id: String,
        fields: Map<String, Value>,
    },
    Delete { kind: EntityKind, id: String },
}

pub struct MockDataStore {
    tables: Mutex<HashMap<EntityKind, Vec<Value>>>,
    next_id: AtomicU64,
    fail_fetches: AtomicBool,
    fail_inserts: AtomicBool,
    fail_updates: AtomicBool,
    fail_deletes: AtomicBool,
    calls: Mutex<Vec<StoreCall>>,
    hold_tx: watch::Sender<bool>,
    hold_rx: watch::Receiver<bool>,
}

impl MockDataStore {
    pub fn new() -> Self {
        let (hold_tx, hold_rx) = watch::channel(false);
        Self {
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1000),
            fail_fetches: AtomicBool::new(false),
            fail_inserts: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            hold_tx,
            hold_rx,
        }
    }

    /// Seed raw rows for a collection
    pub fn with_rows(self, kind: EntityKind, rows: Vec<Value>) -> Self {
        self.tables.lock().unwrap().insert(kind, rows);
        self
    }

    /// Identifier the next insert will be assigned
    pub fn with_next_id(self, id: u64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Park every write until `release_writes` is called
    pub fn hold_writes(&self) {
        self.hold_tx.send_replace(true);
    }

    pub fn release_writes(&self) {
        self.hold_tx.send_replace(false);
    }

    /// All writes received so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Current rows of a collection
    pub fn rows(&self, kind: EntityKind) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Current row with `id`, if any
    pub fn row(&self, kind: EntityKind, id: &str) -> Option<Value> {
        self.rows(kind).into_iter().find(|row| row_id(row) == id)
    }

    async fn wait_until_released(&self) {
        let mut rx = self.hold_rx.clone();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

impl Default for MockDataStore {
    fn default() -> Self {
        Self::new()
    }
}

fn row_id(row: &Value) -> String {
    match row.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

#[async_trait]
impl BaseDataStore for MockDataStore {
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Value>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            anyhow::bail!("mock fetch failure for {}", kind);
        }
        Ok(self.rows(kind))
    }

    async fn insert(&self, kind: EntityKind, record: Value) -> Result<String> {
        self.calls.lock().unwrap().push(StoreCall::Insert {
            kind,
            record: record.clone(),
        });
        self.wait_until_released().await;

        if self.fail_inserts.load(Ordering::SeqCst) {
            anyhow::bail!("mock insert failure for {}", kind);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut row = record;
        if let Value::Object(fields) = &mut row {
            fields.insert("id".to_string(), Value::String(id.clone()));
        }
        self.tables
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(row);
        Ok(id)
    }

    async fn update(&self, kind: EntityKind, id: &str, fields: Map<String, Value>) -> Result<()> {
        self.calls.lock().unwrap().push(StoreCall::Update {
            kind,
            id: id.to_string(),
            fields: fields.clone(),
        });
        self.wait_until_released().await;

        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("mock update failure for {} {}", kind, id);
        }

        let mut tables = self.tables.lock().unwrap();
        if let Some(Value::Object(row)) = tables
            .entry(kind)
            .or_default()
            .iter_mut()
            .find(|row| row_id(row) == id)
        {
            row.extend(fields);
        }
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(StoreCall::Delete {
            kind,
            id: id.to_string(),
        });
        self.wait_until_released().await;

        if self.fail_deletes.load(Ordering::SeqCst) {
            anyhow::bail!("mock delete failure for {} {}", kind, id);
        }

        self.tables
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .retain(|row| row_id(row) != id);
        Ok(())
    }
}

// =============================================================================
// Mock Blob Store
// =============================================================================

/// An object the mock blob store received
#[derive(Debug, Clone)]
pub struct UploadedObject {
    pub bucket: String,
    pub path: String,
    pub size: usize,
    pub content_type: String,
}

pub struct MockBlobStore {
    fail: AtomicBool,
    uploads: Mutex<Vec<UploadedObject>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<UploadedObject> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBlobStore for MockBlobStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("mock upload failure");
        }
        self.uploads.lock().unwrap().push(UploadedObject {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(format!("https://cdn.example.com/{}/{}", bucket, path))
    }
}

// =============================================================================
// Mock Identity Provider
// =============================================================================

pub struct MockIdentityProvider {
    sessions: Mutex<HashMap<String, Identity>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a session token for a user
    pub fn with_session(self, token: &str, user_id: &str, email: Option<&str>) -> Self {
        self.sessions.lock().unwrap().insert(
            token.to_string(),
            Identity {
                user_id: user_id.to_string(),
                email: email.map(str::to_string),
            },
        );
        self
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn current_user(&self, access_token: &str) -> Result<Option<Identity>> {
        Ok(self.sessions.lock().unwrap().get(access_token).cloned())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Admin email registered by `TestDependencies::new`
pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";

/// Session token resolving to the test admin
pub const TEST_ADMIN_TOKEN: &str = "admin-token";

/// Session token resolving to a signed-in non-admin
pub const TEST_VISITOR_TOKEN: &str = "visitor-token";

/// Bundle of doubles plus the `ServerDeps` wired to them
pub struct TestDependencies {
    pub data_store: Arc<MockDataStore>,
    pub blob_store: Arc<MockBlobStore>,
    pub identity: Arc<MockIdentityProvider>,
    pub rollback_policy: RollbackPolicy,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_data_store(MockDataStore::new())
    }

    pub fn with_data_store(data_store: MockDataStore) -> Self {
        Self {
            data_store: Arc::new(data_store),
            blob_store: Arc::new(MockBlobStore::new()),
            identity: Arc::new(
                MockIdentityProvider::new()
                    .with_session(TEST_ADMIN_TOKEN, "admin-1", Some(TEST_ADMIN_EMAIL))
                    .with_session(TEST_VISITOR_TOKEN, "visitor-1", Some("visitor@example.com")),
            ),
            rollback_policy: RollbackPolicy::All,
        }
    }

    pub fn rollback_policy(mut self, policy: RollbackPolicy) -> Self {
        self.rollback_policy = policy;
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.data_store.clone(),
            self.blob_store.clone(),
            self.identity.clone(),
            vec![TEST_ADMIN_EMAIL.to_string()],
            self.rollback_policy,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
