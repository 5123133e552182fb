//! Brew Haven CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! bh-cli migrate
//!
//! # Show the latest contact submissions
//! bh-cli contacts list --limit 20
//!
//! # Validate a catalog file before deploying it
//! bh-cli catalog check crates/storefront/content
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `contacts list` - Print stored contact submissions, newest first
//! - `catalog check` - Parse a content directory's `catalog.json`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bh-cli")]
#[command(author, version, about = "Brew Haven CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect contact submissions
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Work with catalog content
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum ContactsAction {
    /// List the most recent submissions
    List {
        /// Maximum number of submissions to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse and validate a catalog
    Check {
        /// Directory containing `catalog.json`
        #[arg(default_value = "crates/storefront/content")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Contacts { action } => match action {
            ContactsAction::List { limit } => commands::contacts::list(limit).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Check { dir } => commands::catalog::check(&dir)?,
        },
    }
    Ok(())
}
