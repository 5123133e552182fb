//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::config::StorefrontConfig;
use crate::content::{CatalogError, ContentStore};
use crate::services::{ContactClient, ContactClientError, SubmissionStore};

/// Error building the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("contact client: {0}")]
    ContactClient(#[from] ContactClientError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    content: ContentStore,
    submissions: SubmissionStore,
    contact_client: ContactClient,
}

impl AppState {
    /// Create a new application state, loading the catalog from the
    /// configured content directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: StorefrontConfig, submissions: SubmissionStore) -> Result<Self, StateError> {
        let content = ContentStore::load(&config.content_dir)?;
        Self::with_content(config, content, submissions)
    }

    /// Create a new application state around an already loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_content(
        config: StorefrontConfig,
        content: ContentStore,
        submissions: SubmissionStore,
    ) -> Result<Self, StateError> {
        let contact_client = ContactClient::new(&config.contact)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                submissions,
                contact_client,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog content.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the contact submission store.
    #[must_use]
    pub fn submissions(&self) -> &SubmissionStore {
        &self.inner.submissions
    }

    /// Get a reference to the contact endpoint client.
    #[must_use]
    pub fn contact_client(&self) -> &ContactClient {
        &self.inner.contact_client
    }
}
