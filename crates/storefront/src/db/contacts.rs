//! Contact submission repository.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use brew_haven_core::{ContactSubmission, Email, SubmissionId};

use super::RepositoryError;

/// Row shape of `contact_submissions`.
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactSubmission {
    type Error = RepositoryError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: SubmissionId::from_uuid(row.id),
            name: row.name,
            email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

/// Repository for contact submission database operations.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, submission: &ContactSubmission) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO contact_submissions (id, name, email, phone, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(submission.email.as_str())
        .bind(submission.phone.as_deref())
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.created_at)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("submission id already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Newest submissions first, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r"
            SELECT id, name, email, phone, subject, message, created_at
            FROM contact_submissions
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ContactSubmission::try_from).collect()
    }

    /// Check the connection with a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(email: &str) -> ContactRow {
        ContactRow {
            id: Uuid::new_v4(),
            name: "Emily Rodriguez".to_string(),
            email: email.to_string(),
            phone: Some("(555) 123-4567".to_string()),
            subject: "Private Events".to_string(),
            message: "Can we book the back room?".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_converts_to_submission() {
        let row = row("emily@example.com");
        let id = row.id;
        let submission = ContactSubmission::try_from(row).unwrap();
        assert_eq!(submission.id.as_uuid(), id);
        assert_eq!(submission.email.as_str(), "emily@example.com");
        assert_eq!(submission.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_corrupt_email_is_reported() {
        let result = ContactSubmission::try_from(row("not an email"));
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
