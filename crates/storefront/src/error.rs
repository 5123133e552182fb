//! Handler errors.
//!
//! Client errors are answered with their message. Server errors are sent to
//! Sentry and logged, and the client only sees "Internal server error".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error returned by storefront handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The visitor's session could not be written.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is the server's fault.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !status.is_server_error() {
            return (status, self.to_string()).into_response();
        }

        let event_id = sentry::capture_error(&self);
        tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
        (status, "Internal server error").into_response()
    }
}

/// Handler result.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a visitor action as a Sentry breadcrumb.
///
/// `data` pairs are attached as string values.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, String)]) {
    let data = data
        .iter()
        .map(|(key, value)| ((*key).to_owned(), serde_json::Value::from(value.as_str())))
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use tower_sessions::session::Error as SessionError;
    use tower_sessions::session_store::Error as StoreError;

    use super::*;

    fn session_error(detail: &str) -> AppError {
        AppError::Session(SessionError::Store(StoreError::Backend(detail.to_string())))
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item 42".to_string());
        assert_eq!(err.to_string(), "Not found: menu item 42");
    }

    #[test]
    fn test_status_and_blame() {
        let not_found = AppError::NotFound("menu item 99".into());
        assert!(!not_found.is_server_error());
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let session = session_error("store unavailable");
        assert!(session.is_server_error());
        assert_eq!(
            session.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_not_found_message_reaches_client() {
        let response = AppError::NotFound("menu item 99".to_string()).into_response();
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap_or_default();
        assert_eq!(body.as_ref(), b"Not found: menu item 99");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let response = session_error("connection refused to 10.0.0.5").into_response();
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap_or_default();
        assert_eq!(body.as_ref(), b"Internal server error");
    }
}
