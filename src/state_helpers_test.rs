use std::sync::Mutex;

use composer::types::CategoryType;
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::backend::{Office, StoreError, User, UserCategory};

/// In-memory backend that records every call.
pub struct MockBackend {
    pub user: Option<User>,
    pub office: Option<Office>,
    pub categories: Vec<UserCategory>,
    /// Inserts into this table fail with a 500.
    pub fail_table: Option<String>,
    /// Uploads whose path contains this marker fail; `Some("")` fails all.
    pub fail_upload: Option<String>,
    pub fail_categories: bool,
    pub inserts: Mutex<Vec<(String, Value)>>,
    pub uploads: Mutex<Vec<(String, String, usize)>>,
}

impl MockBackend {
    #[must_use]
    pub fn signed_in() -> Self {
        Self {
            user: Some(User { id: Uuid::new_v4(), email: Some("owner@example.com".into()) }),
            office: Some(Office { id: Uuid::new_v4(), name: Some("Test Office".into()), slug: Some("test".into()) }),
            categories: Vec::new(),
            fail_table: None,
            fail_upload: None,
            fail_categories: false,
            inserts: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn office_id(&self) -> Uuid {
        self.office.as_ref().map(|o| o.id).unwrap_or_default()
    }

    /// Rows inserted into `table`, in call order.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.inserts
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, row)| row.clone())
            .collect()
    }

    #[must_use]
    pub fn upload_paths(&self) -> Vec<String> {
        self.uploads.lock().unwrap().iter().map(|(p, _, _)| p.clone()).collect()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockBackend {
    async fn current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(self.user.clone())
    }
}

#[async_trait::async_trait]
impl OfficeContext for MockBackend {
    async fn current_office(&self, _user: &User) -> Result<Option<Office>, StoreError> {
        Ok(self.office.clone())
    }
}

#[async_trait::async_trait]
impl RecordStore for MockBackend {
    async fn insert(&self, table: &str, record: Value) -> Result<Value, StoreError> {
        if self.fail_table.as_deref() == Some(table) {
            return Err(StoreError::Response { status: 500, body: format!("{table} unavailable") });
        }
        self.inserts.lock().unwrap().push((table.to_string(), record.clone()));
        Ok(record)
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockBackend {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_upload.as_deref().is_some_and(|marker| path.contains(marker)) {
            return Err(StoreError::Request("connection reset".into()));
        }
        self.uploads.lock().unwrap().push((path.to_string(), content_type.to_string(), bytes.len()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/{path}")
    }
}

#[async_trait::async_trait]
impl CategoryLookup for MockBackend {
    async fn list_user_categories(
        &self,
        _office_id: Uuid,
        category_type: CategoryType,
    ) -> Result<Vec<UserCategory>, StoreError> {
        if self.fail_categories {
            return Err(StoreError::Response { status: 503, body: String::new() });
        }
        Ok(self.categories.iter().filter(|c| c.category_type == category_type).cloned().collect())
    }
}

/// State backed by `backend`; returns both so tests can inspect calls.
#[must_use]
pub fn test_app_state(backend: MockBackend) -> (AppState, Arc<MockBackend>) {
    let backend = Arc::new(backend);
    (AppState::new(backend.clone()), backend)
}
