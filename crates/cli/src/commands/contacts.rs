//! Contact submission commands.

use brew_haven_core::ContactSubmission;
use brew_haven_storefront::db::ContactRepository;

use super::{DatabaseCommandError, connect};

/// Print the latest `limit` submissions, newest first.
pub async fn list(limit: i64) -> Result<(), DatabaseCommandError> {
    let pool = connect().await?;
    let submissions = ContactRepository::new(&pool).list_recent(limit).await?;

    if submissions.is_empty() {
        tracing::info!("No contact submissions yet");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for submission in &submissions {
            println!("{}", summary_line(submission));
        }
    }

    tracing::info!(count = submissions.len(), "Listed contact submissions");
    Ok(())
}

fn summary_line(submission: &ContactSubmission) -> String {
    format!(
        "{}  {:<24} {:<32} {}",
        submission.created_at.format("%Y-%m-%d %H:%M"),
        submission.name,
        submission.email,
        submission.subject,
    )
}
