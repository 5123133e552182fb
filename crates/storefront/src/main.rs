//! Brew Haven storefront - the coffee shop website.
//!
//! Serves the pages, the session cart and the contact form on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for interactivity
//! - Askama templates for server-side rendering
//! - Catalog content loaded from `catalog.json` at startup
//! - Cart kept in the visitor's session (in-memory session store)
//! - `PostgreSQL` for contact submissions when `DATABASE_URL` is set,
//!   otherwise an in-memory list

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use brew_haven_storefront::config::StorefrontConfig;
use brew_haven_storefront::services::SubmissionStore;
use brew_haven_storefront::state::AppState;
use brew_haven_storefront::{build_router, db};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Set up Sentry (when a DSN is configured) and the tracing subscriber.
///
/// The returned guard flushes pending Sentry events when dropped, so it must
/// live until the server stops.
fn init_telemetry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    // Sentry goes first so the tracing layer finds an active client
    let guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.sentry_environment.clone().into()),
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "brew_haven_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if guard.is_some() {
        tracing::info!(environment = %config.sentry_environment, "Sentry initialized");
    }
    guard
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = init_telemetry(&config);

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p brew-haven-cli -- migrate
    let submissions = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");
            SubmissionStore::Postgres(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, contact submissions are kept in memory");
            SubmissionStore::memory()
        }
    };

    let state = AppState::new(config.clone(), submissions)
        .expect("Failed to initialize application state");
    tracing::info!(
        items = state.content().catalog().menu.items().count(),
        "Catalog loaded"
    );

    let app = build_router(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Connect info feeds the rate limiter's fallback client key
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");
}

/// Resolve on Ctrl+C, or on SIGTERM where available.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.expect("Failed to listen for Ctrl+C"),
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");

    tracing::info!("Shutting down, draining open connections");
}
