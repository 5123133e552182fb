//! CLI command implementations.

pub mod catalog;
pub mod contacts;
pub mod migrate;

use brew_haven_storefront::config::{ConfigError, StorefrontConfig};
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from commands that need the database.
#[derive(Debug, Error)]
pub enum DatabaseCommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] brew_haven_storefront::db::RepositoryError),
}

/// Resolve the storefront database URL the same way the server does.
pub fn database_url() -> Result<SecretString, ConfigError> {
    StorefrontConfig::from_env()?
        .database_url
        .ok_or_else(|| ConfigError::MissingEnvVar("BREW_HAVEN_DATABASE_URL".to_string()))
}

/// Connect to the storefront database.
pub async fn connect() -> Result<PgPool, DatabaseCommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to storefront database...");
    Ok(brew_haven_storefront::db::create_pool(&url).await?)
}
