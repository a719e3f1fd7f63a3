use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Document store that forwards every call to a hosted document service.
///
/// Documents live under `{base}/users/{owner}/{collection}/{id}`. Requests
/// carry the service token as a bearer header when one is configured.
pub struct RemoteDocumentStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct CreatedDocument {
    id: String,
}

impl RemoteDocumentStore {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn collection_url(&self, owner: &str, collection: &str) -> String {
        format!("{}/users/{}/{}", self.base_url, owner, collection)
    }

    fn document_url(&self, owner: &str, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(owner, collection), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        Ok(self.authorize(request).send().await?)
    }

    fn check(response: Response, collection: &str, id: &str) -> Result<Response, StoreError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(collection, id)),
            status if !status.is_success() => {
                tracing::warn!("Document service returned {} for {}/{}", status, collection, id);
                Err(StoreError::Status(status.as_u16()))
            }
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl DocumentStore for RemoteDocumentStore {
    async fn create(
        &self,
        owner: &str,
        collection: &str,
        body: Value,
    ) -> Result<String, StoreError> {
        let request = self.client.post(self.collection_url(owner, collection)).json(&body);
        let response = Self::check(self.send(request).await?, collection, "")?;
        let created: CreatedDocument = response.json().await?;
        Ok(created.id)
    }

    async fn list(&self, owner: &str, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let request = self.client.get(self.collection_url(owner, collection));
        let response = Self::check(self.send(request).await?, collection, "")?;
        Ok(response.json().await?)
    }

    async fn get(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let request = self.client.get(self.document_url(owner, collection, id));
        match Self::check(self.send(request).await?, collection, id) {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.document_url(owner, collection, id))
            .json(&body);
        Self::check(self.send(request).await?, collection, id)?;
        Ok(())
    }

    async fn upsert(
        &self,
        owner: &str,
        collection: &str,
        id: &str,
        body: Value,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .put(self.document_url(owner, collection, id))
            .json(&body);
        Self::check(self.send(request).await?, collection, id)?;
        Ok(())
    }

    async fn delete(&self, owner: &str, collection: &str, id: &str) -> Result<(), StoreError> {
        let request = self.client.delete(self.document_url(owner, collection, id));
        Self::check(self.send(request).await?, collection, id)?;
        Ok(())
    }
}
