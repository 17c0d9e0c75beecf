//! Hosted backend client: PostgREST rows, storage objects, and auth.
//!
//! One [`SupabaseClient`] serves every collaborator contract. Requests carry
//! the project's anon key as `apikey` and the user's access token (or the
//! anon key when signed out) as the bearer credential.

use std::time::Duration;

use composer::types::CategoryType;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::types::{CategoryLookup, IdentityProvider, ObjectStore, Office, OfficeContext, RecordStore, StoreError, User, UserCategory};
use crate::config::AppConfig;

const OFFICES_TABLE: &str = "offices";
const CATEGORIES_TABLE: &str = "categories";

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
    bucket: String,
    fallback_office: Option<Uuid>,
}

impl SupabaseClient {
    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.backend_url.clone(),
            anon_key: config.anon_key.clone(),
            access_token: config.access_token.clone(),
            bucket: config.image_bucket.clone(),
            fallback_office: config.office_id,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        builder.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, StoreError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(StoreError::Response { status, body: text });
        }
        Ok(text)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>, StoreError> {
        let url = rest_url(&self.base_url, table);
        let text = self.send(self.http.get(url).query(query)).await?;
        parse_rows(&text)
    }
}

// =============================================================================
// CONTRACTS
// =============================================================================

#[async_trait::async_trait]
impl IdentityProvider for SupabaseClient {
    async fn current_user(&self) -> Result<Option<User>, StoreError> {
        if self.access_token.is_none() {
            return Ok(None);
        }
        let url = format!("{}/auth/v1/user", self.base_url);
        match self.send(self.http.get(url)).await {
            Ok(text) => parse_user(&text).map(Some),
            Err(StoreError::Response { status: 401 | 403, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl OfficeContext for SupabaseClient {
    async fn current_office(&self, user: &User) -> Result<Option<Office>, StoreError> {
        let query = [
            ("owner_id", format!("eq.{}", user.id)),
            ("select", "id,name,slug".to_string()),
            ("limit", "1".to_string()),
        ];
        let offices: Vec<Office> = self.select(OFFICES_TABLE, &query).await?;
        let office = offices
            .into_iter()
            .next()
            .or_else(|| self.fallback_office.map(|id| Office { id, name: None, slug: None }));
        debug!(user_id = %user.id, office_id = ?office.as_ref().map(|o| o.id), "office resolved");
        Ok(office)
    }
}

#[async_trait::async_trait]
impl RecordStore for SupabaseClient {
    async fn insert(&self, table: &str, record: Value) -> Result<Value, StoreError> {
        let url = rest_url(&self.base_url, table);
        let request = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(&record);
        let text = self.send(request).await?;
        parse_inserted(&text)
    }
}

#[async_trait::async_trait]
impl ObjectStore for SupabaseClient {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path);
        let size = bytes.len();
        let request = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        self.send(request).await?;
        debug!(%path, size, "object uploaded");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }
}

#[async_trait::async_trait]
impl CategoryLookup for SupabaseClient {
    async fn list_user_categories(
        &self,
        office_id: Uuid,
        category_type: CategoryType,
    ) -> Result<Vec<UserCategory>, StoreError> {
        let query = [
            ("office_id", format!("eq.{office_id}")),
            ("category_type", format!("eq.{category_type}")),
            ("select", "id,name,category_type,image_url".to_string()),
            ("order", "name.asc".to_string()),
        ];
        self.select(CATEGORIES_TABLE, &query).await
    }
}

// =============================================================================
// URLS AND PARSING
// =============================================================================

fn rest_url(base_url: &str, table: &str) -> String {
    format!("{base_url}/rest/v1/{table}")
}

fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!("{base_url}/storage/v1/object/public/{bucket}/{path}")
}

fn parse_rows<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Parse(e.to_string()))
}

fn parse_user(text: &str) -> Result<User, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Parse(e.to_string()))
}

/// PostgREST answers an insert with an array holding the stored row.
fn parse_inserted(text: &str) -> Result<Value, StoreError> {
    let value: Value = serde_json::from_str(text).map_err(|e| StoreError::Parse(e.to_string()))?;
    match value {
        Value::Array(mut rows) if !rows.is_empty() => Ok(rows.swap_remove(0)),
        Value::Array(_) => Err(StoreError::Parse("insert returned no rows".into())),
        row @ Value::Object(_) => Ok(row),
        other => Err(StoreError::Parse(format!("unexpected insert response: {other}"))),
    }
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
