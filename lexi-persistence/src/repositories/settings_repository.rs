use std::sync::Arc;

use lexi_types::UserSettings;

use crate::store::{DocumentStore, StoreError};

const SETTINGS_COLLECTION: &str = "settings";
const SETTINGS_ID: &str = "profile";

/// The single settings document per user
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn DocumentStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stored settings, or defaults when the user never saved any
    pub async fn get_settings(&self, owner: &str) -> Result<UserSettings, StoreError> {
        match self.store.get(owner, SETTINGS_COLLECTION, SETTINGS_ID).await? {
            Some(document) => Ok(serde_json::from_value(document.body)?),
            None => Ok(UserSettings::default()),
        }
    }

    pub async fn save_settings(&self, owner: &str, settings: &UserSettings) -> Result<(), StoreError> {
        let body = serde_json::to_value(settings)?;
        self.store
            .upsert(owner, SETTINGS_COLLECTION, SETTINGS_ID, body)
            .await?;
        tracing::info!("Saved settings for user {}", owner);
        Ok(())
    }

    pub async fn delete_settings(&self, owner: &str) -> Result<(), StoreError> {
        self.store
            .delete(owner, SETTINGS_COLLECTION, SETTINGS_ID)
            .await
    }
}
