pub mod collections;
pub mod settings_repository;

pub use collections::{Document, UserCollection};
pub use settings_repository::SettingsRepository;
