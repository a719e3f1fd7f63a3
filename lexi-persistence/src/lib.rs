pub mod connection;
pub mod entities;
pub mod remote_store;
pub mod repositories;
pub mod sqlite_store;
pub mod store;

pub use remote_store::RemoteDocumentStore;
pub use repositories::{Document, SettingsRepository, UserCollection};
pub use sqlite_store::SqliteDocumentStore;
pub use store::{DocumentStore, StoreError, StoredDocument};
