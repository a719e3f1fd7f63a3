use std::marker::PhantomData;
use std::sync::Arc;

use lexi_types::{FavoriteList, PersonalNote, SupportRequest};
use serde::{de::DeserializeOwned, Serialize};

use crate::store::{DocumentStore, StoreError, StoredDocument};

/// A user-owned document kept in a named collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
    fn stamp_created(&mut self, now: &str);
    fn stamp_modified(&mut self, now: &str);

    /// Carry fields the client does not resend on update
    fn inherit(&mut self, _previous: &Self) {}
}

impl Document for PersonalNote {
    const COLLECTION: &'static str = "personalNotes";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: &str) {
        self.date_created = now.to_string();
        self.last_modified = now.to_string();
    }

    fn stamp_modified(&mut self, now: &str) {
        self.last_modified = now.to_string();
    }

    fn inherit(&mut self, previous: &Self) {
        if self.date_created.is_empty() {
            self.date_created = previous.date_created.clone();
        }
    }
}

impl Document for FavoriteList {
    const COLLECTION: &'static str = "favoriteLists";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: &str) {
        self.date_created = now.to_string();
        self.last_modified = now.to_string();
    }

    fn stamp_modified(&mut self, now: &str) {
        self.last_modified = now.to_string();
    }

    fn inherit(&mut self, previous: &Self) {
        if self.date_created.is_empty() {
            self.date_created = previous.date_created.clone();
        }
    }
}

impl Document for SupportRequest {
    const COLLECTION: &'static str = "supportRequests";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: &str) {
        self.timestamp = now.to_string();
    }

    // Support requests are submitted once
    fn stamp_modified(&mut self, _now: &str) {}
}

/// Typed CRUD over one collection of a user's documents
pub struct UserCollection<T: Document> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<T>,
}

impl<T: Document> Clone for UserCollection<T> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

impl<T: Document> UserCollection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn to_body(document: &T) -> Result<serde_json::Value, StoreError> {
        let mut body = serde_json::to_value(document)?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("id");
        }
        Ok(body)
    }

    fn from_stored(stored: StoredDocument) -> Result<T, StoreError> {
        let mut document: T = serde_json::from_value(stored.body)?;
        document.set_id(Some(stored.id));
        Ok(document)
    }

    /// Stamp and store a new document, returning it with its assigned id
    pub async fn create(&self, owner: &str, mut document: T) -> Result<T, StoreError> {
        document.set_id(None);
        document.stamp_created(&chrono::Utc::now().to_rfc3339());

        let id = self
            .store
            .create(owner, T::COLLECTION, Self::to_body(&document)?)
            .await?;
        tracing::info!("Created {} document {} for user {}", T::COLLECTION, id, owner);

        document.set_id(Some(id));
        Ok(document)
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<T>, StoreError> {
        self.store
            .list(owner, T::COLLECTION)
            .await?
            .into_iter()
            .map(Self::from_stored)
            .collect()
    }

    pub async fn get(&self, owner: &str, id: &str) -> Result<Option<T>, StoreError> {
        self.store
            .get(owner, T::COLLECTION, id)
            .await?
            .map(Self::from_stored)
            .transpose()
    }

    pub async fn update(&self, owner: &str, id: &str, mut document: T) -> Result<T, StoreError> {
        let previous = self
            .get(owner, id)
            .await?
            .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;

        document.inherit(&previous);
        document.stamp_modified(&chrono::Utc::now().to_rfc3339());
        document.set_id(None);

        self.store
            .update(owner, T::COLLECTION, id, Self::to_body(&document)?)
            .await?;

        document.set_id(Some(id.to_string()));
        Ok(document)
    }

    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        self.store.delete(owner, T::COLLECTION, id).await?;
        tracing::info!("Deleted {} document {} for user {}", T::COLLECTION, id, owner);
        Ok(())
    }
}
