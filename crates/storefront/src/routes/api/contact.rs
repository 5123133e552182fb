//! Contact submission API.
//!
//! Errors are answered as `{"detail": "..."}` with the matching status code.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use brew_haven_core::{ContactForm, ContactSubmission};

use crate::state::AppState;

const STORE_FAILED: &str = "Failed to process contact form submission";
const LIST_FAILED: &str = "Failed to fetch contact submissions";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Validate and store a contact submission.
///
/// # Errors
///
/// 422 if the body is malformed or fails validation, 500 if storing fails.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let Json(form) =
        payload.map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.body_text()))?;

    let contact = form
        .validate()
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let submission = ContactSubmission::new(contact);
    if let Err(e) = state.submissions().insert(&submission).await {
        tracing::error!(error = %e, "Failed to store contact submission");
        sentry::capture_error(&e);
        return Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILED));
    }

    tracing::info!(
        id = %submission.id,
        email = %submission.email,
        subject = %submission.subject,
        backend = state.submissions().backend(),
        "Contact submission received"
    );

    Ok(Json(submission))
}

/// Latest submissions, newest first.
///
/// # Errors
///
/// 500 if the store cannot be read.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    state.submissions().list_recent().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Failed to list contact submissions");
        sentry::capture_error(&e);
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn test_error_body_has_detail_only() {
        let response =
            ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Please enter your name.")
                .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "detail": "Please enter your name." }));
    }
}
