use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

pub async fn connect_to_database(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}

/// Connect and bring the schema up to date
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection> {
    let db = connect_to_database(database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", database_url))?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database ready at {}", database_url);
    Ok(db)
}
