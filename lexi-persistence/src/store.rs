use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document {id} not found in {collection}")]
    NotFound { collection: String, id: String },
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Remote store request failed: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("Remote store returned status {0}")]
    Status(u16),
    #[error("Malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A document as kept by the store: its id, JSON body and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
    pub created_at: String,
    pub updated_at: String,
}

/// User-scoped document collections. Every operation names the owning user
/// and the collection; a user never sees another user's documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its generated id
    async fn create(&self, owner: &str, collection: &str, body: Value)
    -> Result<String, StoreError>;

    async fn list(&self, owner: &str, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn get(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Replace the body of an existing document
    async fn update(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError>;

    /// Write a document under a caller-chosen id, creating it if needed
    async fn upsert(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError>;

    async fn delete(&self, owner: &str, collection: &str, id: &str) -> Result<(), StoreError>;
}
