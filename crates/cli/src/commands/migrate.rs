//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bh-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BREW_HAVEN_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded in the
//! storefront crate at build time.

use brew_haven_storefront::db::MIGRATOR;

use super::{DatabaseCommandError, connect};

/// Run storefront database migrations.
pub async fn run() -> Result<(), DatabaseCommandError> {
    let pool = connect().await?;

    tracing::info!(count = MIGRATOR.iter().count(), "Running storefront migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
