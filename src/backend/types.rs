//! Collaborator contracts and the rows they exchange.

use composer::types::CategoryType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Response { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl StoreError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// ROWS
// =============================================================================

/// Signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// The office (tenant) advertisements are posted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Office-defined category offered in the vehicles and real-estate forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCategory {
    pub id: Uuid,
    pub name: String,
    pub category_type: CategoryType,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// CONTRACTS
// =============================================================================

/// Resolves the signed-in user.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<User>, StoreError>;
}

/// Resolves the office a user posts under.
#[async_trait::async_trait]
pub trait OfficeContext: Send + Sync {
    async fn current_office(&self, user: &User) -> Result<Option<Office>, StoreError>;
}

/// Row inserts.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one row into `table` and return the stored row.
    async fn insert(&self, table: &str, record: Value) -> Result<Value, StoreError>;
}

/// Binary object storage.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Publicly reachable URL for an uploaded object.
    fn public_url(&self, path: &str) -> String;
}

/// Office-defined categories.
#[async_trait::async_trait]
pub trait CategoryLookup: Send + Sync {
    async fn list_user_categories(
        &self,
        office_id: Uuid,
        category_type: CategoryType,
    ) -> Result<Vec<UserCategory>, StoreError>;
}
