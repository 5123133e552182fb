//! HTTP client for the contact endpoint.
//!
//! The contact form does not write submissions itself; it posts them as JSON
//! to the configured endpoint (by default this server's own `/api/contact`)
//! and reports back one of three outcomes: sent, rejected by the server, or
//! not delivered at all.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use brew_haven_core::{ContactForm, ValidContact};

use crate::config::ContactConfig;

/// Shown when the server rejects a submission without saying why.
pub const FALLBACK_REJECTION: &str = "Something went wrong. Please try again.";

/// Errors that can occur when submitting a contact request.
#[derive(Debug, Error)]
pub enum ContactClientError {
    /// The endpoint answered with a non-success status.
    #[error("contact endpoint returned {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },

    /// The request never got a response (connection, timeout, DNS).
    #[error("contact request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ContactClientError {
    /// Message to show the visitor.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail,
            Self::Rejected { detail: None, .. } => FALLBACK_REJECTION,
            Self::Transport(_) => {
                "Failed to send message. Please check your connection and try again."
            }
        }
    }
}

/// Error payload returned by the contact API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for posting contact submissions.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    /// Create a new contact client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ContactConfig) -> Result<Self, ContactClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("brew-haven-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The URL submissions are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a validated contact request. Not retried.
    ///
    /// # Errors
    ///
    /// Returns `ContactClientError::Rejected` with the server's `detail`
    /// message (if any) for non-success responses, and
    /// `ContactClientError::Transport` when no response arrived.
    pub async fn submit(&self, contact: &ValidContact) -> Result<(), ContactClientError> {
        let body = ContactForm::from(contact);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            // Body may be empty or not JSON
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .filter(|detail| !detail.trim().is_empty());
            return Err(ContactClientError::Rejected { status, detail });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::post};

    use super::*;

    fn contact() -> ValidContact {
        ContactForm {
            name: "Mike Chen".to_string(),
            email: "mike@example.com".to_string(),
            phone: None,
            subject: "Coffee Beans Order".to_string(),
            message: "Do you sell whole beans by the pound?".to_string(),
        }
        .validate()
        .unwrap()
    }

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/api/contact")).unwrap()
    }

    fn client(endpoint: Url) -> ContactClient {
        ContactClient::new(&ContactConfig {
            endpoint,
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_success() {
        let router = Router::new().route(
            "/api/contact",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["email"], "mike@example.com");
                Json(body)
            }),
        );
        let endpoint = serve(router).await;
        assert!(client(endpoint).submit(&contact()).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_uses_server_detail() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async {
                (
                    AxumStatus::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "detail": "Subject is not accepted." })),
                )
            }),
        );
        let endpoint = serve(router).await;
        let err = client(endpoint).submit(&contact()).await.unwrap_err();
        assert!(matches!(err, ContactClientError::Rejected { status, .. } if status.as_u16() == 422));
        assert_eq!(err.user_message(), "Subject is not accepted.");
    }

    #[tokio::test]
    async fn test_submit_without_detail_uses_fallback() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let endpoint = serve(router).await;
        let err = client(endpoint).submit(&contact()).await.unwrap_err();
        assert_eq!(err.user_message(), FALLBACK_REJECTION);
    }

    #[tokio::test]
    async fn test_submit_transport_failure() {
        // Bind then drop so nothing is listening on the port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = Url::parse(&format!("http://{addr}/api/contact")).unwrap();
        let err = client(endpoint).submit(&contact()).await.unwrap_err();
        assert!(matches!(err, ContactClientError::Transport(_)));
        assert_eq!(
            err.user_message(),
            "Failed to send message. Please check your connection and try again."
        );
    }
}
