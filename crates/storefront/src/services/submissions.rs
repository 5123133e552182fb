//! Storage for contact submissions.
//!
//! Backed by `PostgreSQL` when a database is configured, otherwise by an
//! in-process list that is lost on restart. The in-process list keeps only
//! the latest [`LIST_LIMIT`] submissions.

use std::collections::VecDeque;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use brew_haven_core::ContactSubmission;

use crate::db::{ContactRepository, RepositoryError};

/// Most submissions returned by a listing, and kept in memory.
pub const LIST_LIMIT: usize = 100;

/// Where contact submissions are kept.
#[derive(Debug, Clone)]
pub enum SubmissionStore {
    Postgres(PgPool),
    Memory(Arc<RwLock<VecDeque<ContactSubmission>>>),
}

impl SubmissionStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Short name for logs and health output.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Store a submission.
    ///
    /// The in-memory store drops its oldest entry once full.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database write fails.
    pub async fn insert(&self, submission: &ContactSubmission) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(pool) => ContactRepository::new(pool).insert(submission).await,
            Self::Memory(list) => {
                let mut list = list.write().await;
                if list.len() >= LIST_LIMIT {
                    list.pop_front();
                }
                list.push_back(submission.clone());
                Ok(())
            }
        }
    }

    /// Newest submissions first, at most [`LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database read fails.
    pub async fn list_recent(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        match self {
            Self::Postgres(pool) => {
                #[allow(clippy::cast_possible_wrap)] // small constant
                let limit = LIST_LIMIT as i64;
                ContactRepository::new(pool).list_recent(limit).await
            }
            Self::Memory(list) => {
                let mut recent: Vec<ContactSubmission> =
                    list.read().await.iter().rev().cloned().collect();
                // Stable: equal timestamps stay latest-inserted first
                recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(recent)
            }
        }
    }

    /// Whether the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(pool) => ContactRepository::new(pool).ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}
