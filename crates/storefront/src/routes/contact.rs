//! Contact page and form submission.
//!
//! The form is validated here, then forwarded to the contact endpoint by
//! [`ContactClient`](crate::services::ContactClient). HTMX requests get the
//! form fragment back; plain form posts get the whole page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use brew_haven_core::{ContactForm, contact::SUBJECTS};

use super::PageContext;
use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

/// Shown after the endpoint accepted a submission.
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";

/// Outcome banner above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub success: bool,
    pub message: String,
}

impl StatusView {
    fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Subject drop-down option.
#[derive(Debug, Clone)]
pub struct SubjectOption {
    pub name: &'static str,
    pub selected: bool,
}

/// Form values as redisplayed to the visitor.
#[derive(Debug, Clone, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub subjects: Vec<SubjectOption>,
    pub status: Option<StatusView>,
}

impl ContactFormView {
    /// An empty form, optionally with a status banner.
    #[must_use]
    pub fn empty(status: Option<StatusView>) -> Self {
        Self::retained(&ContactForm::default(), status)
    }

    /// The visitor's input, kept for another attempt.
    #[must_use]
    pub fn retained(form: &ContactForm, status: Option<StatusView>) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone().unwrap_or_default(),
            subject: form.subject.clone(),
            message: form.message.clone(),
            subjects: SUBJECTS
                .iter()
                .map(|name| SubjectOption {
                    name,
                    selected: form.subject == *name,
                })
                .collect(),
            status,
        }
    }

    /// Whether the last submission failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.status.as_ref().is_some_and(|s| !s.success)
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
    pub form: ContactFormView,
}

/// Contact form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_form.html")]
pub struct ContactFormTemplate {
    pub form: ContactFormView,
}

/// Display the contact page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    ContactTemplate {
        page: PageContext::load(&state, &session, "/contact").await,
        form: ContactFormView::empty(None),
    }
}

/// Submit the contact form.
///
/// On success the form is emptied; on any failure the visitor's input is
/// kept and the reason is shown above the form.
#[instrument(skip(state, session, headers, form), fields(subject = %form.subject))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Response {
    let view = process(&state, &form).await;

    if headers.contains_key("hx-request") {
        return ContactFormTemplate { form: view }.into_response();
    }

    ContactTemplate {
        page: PageContext::load(&state, &session, "/contact").await,
        form: view,
    }
    .into_response()
}

async fn process(state: &AppState, form: &ContactForm) -> ContactFormView {
    let contact = match form.validate() {
        Ok(contact) => contact,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected");
            return ContactFormView::retained(form, Some(StatusView::error(e.to_string())));
        }
    };

    add_breadcrumb(
        "contact",
        "Submitting contact form",
        &[("subject", contact.subject.clone())],
    );

    match state.contact_client().submit(&contact).await {
        Ok(()) => {
            tracing::info!(subject = %contact.subject, "Contact form sent");
            ContactFormView::empty(Some(StatusView::success()))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                endpoint = %state.contact_client().endpoint(),
                "Contact form submission failed"
            );
            ContactFormView::retained(form, Some(StatusView::error(e.user_message())))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_retained_form_marks_subject() {
        let form = ContactForm {
            subject: "Private Events".to_string(),
            phone: Some("555".to_string()),
            ..ContactForm::default()
        };
        let view = ContactFormView::retained(&form, None);
        assert_eq!(view.phone, "555");
        let selected: Vec<&str> = view
            .subjects
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name)
            .collect();
        assert_eq!(selected, vec!["Private Events"]);
        assert!(!view.has_error());
    }

    #[test]
    fn test_fragment_shows_status() {
        let html = ContactFormTemplate {
            form: ContactFormView::empty(Some(StatusView::success())),
        }
        .render()
        .unwrap();
        assert!(html.contains("within 24 hours"));

        let html = ContactFormTemplate {
            form: ContactFormView::retained(
                &ContactForm {
                    name: "Sarah".to_string(),
                    ..ContactForm::default()
                },
                Some(StatusView::error("Please enter a valid email address.")),
            ),
        }
        .render()
        .unwrap();
        assert!(html.contains("Please enter a valid email address."));
        assert!(html.contains("value=\"Sarah\""));
    }
}
