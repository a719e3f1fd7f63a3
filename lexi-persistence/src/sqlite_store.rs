use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select,
};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::{documents, prelude::*};
use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Document store backed by the local `documents` table
pub struct SqliteDocumentStore {
    db: DatabaseConnection,
}

impl SqliteDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(owner: &str, collection: &str) -> Select<Documents> {
        Documents::find()
            .filter(documents::Column::OwnerId.eq(owner))
            .filter(documents::Column::Collection.eq(collection))
    }

    fn model_to_document(model: documents::Model) -> Result<StoredDocument, StoreError> {
        Ok(StoredDocument {
            id: model.id,
            body: serde_json::from_str(&model.body)?,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        })
    }

    async fn find_model(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<documents::Model>, StoreError> {
        Ok(Self::scoped(owner, collection)
            .filter(documents::Column::Id.eq(id))
            .one(&self.db)
            .await?)
    }

    async fn insert(
        &self,
        owner: &str,
        collection: &str,
        id: String,
        body: &Value,
    ) -> Result<(), StoreError> {
        let now = chrono::Utc::now().into();
        let model = documents::ActiveModel {
            id: ActiveValue::Set(id),
            owner_id: ActiveValue::Set(owner.to_string()),
            collection: ActiveValue::Set(collection.to_string()),
            body: ActiveValue::Set(body.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        Documents::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn replace_body(&self, model: documents::Model, body: &Value) -> Result<(), StoreError> {
        let mut active: documents::ActiveModel = model.into();
        active.body = ActiveValue::Set(body.to_string());
        active.updated_at = ActiveValue::Set(chrono::Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(
        &self,
        owner: &str,
        collection: &str,
        body: Value,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.insert(owner, collection, id.clone(), &body).await?;
        tracing::debug!("Created {}/{} for user {}", collection, id, owner);
        Ok(id)
    }

    async fn list(&self, owner: &str, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Self::scoped(owner, collection)
            .order_by_asc(documents::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Self::model_to_document)
            .collect()
    }

    async fn get(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.find_model(owner, collection, id)
            .await?
            .map(Self::model_to_document)
            .transpose()
    }

    async fn update(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        let model = self
            .find_model(owner, collection, id)
            .await?
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        self.replace_body(model, &body).await
    }

    async fn upsert(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        match self.find_model(owner, collection, id).await? {
            Some(model) => self.replace_body(model, &body).await,
            None => self.insert(owner, collection, id.to_string(), &body).await,
        }
    }

    async fn delete(&self, owner: &str, collection: &str, id: &str) -> Result<(), StoreError> {
        let result = Documents::delete_many()
            .filter(documents::Column::OwnerId.eq(owner))
            .filter(documents::Column::Collection.eq(collection))
            .filter(documents::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(collection, id));
        }
        tracing::debug!("Deleted {}/{} for user {}", collection, id, owner);
        Ok(())
    }
}
