//! Contact form validation and stored submissions.
//!
//! The same rules apply to the HTML form and the JSON endpoint, so both go
//! through [`ContactForm::validate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EmailError, SubmissionId};

/// Field length limits, in characters.
pub mod limits {
    pub const NAME_MAX: usize = 100;
    pub const PHONE_MAX: usize = 20;
    pub const SUBJECT_MAX: usize = 200;
    pub const MESSAGE_MIN: usize = 10;
    pub const MESSAGE_MAX: usize = 2000;
}

/// Subjects offered by the contact form's drop-down.
pub const SUBJECTS: &[&str] = &[
    "General Inquiry",
    "Catering Services",
    "Private Events",
    "Coffee Beans Order",
    "Feedback",
    "Partnership",
    "Other",
];

/// Why a contact submission was rejected.
///
/// The display text is shown to the visitor as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Name must be at most {} characters.", limits::NAME_MAX)]
    NameTooLong,
    #[error("Please enter a valid email address.")]
    InvalidEmail(#[source] EmailError),
    #[error("Phone number must be at most {} characters.", limits::PHONE_MAX)]
    PhoneTooLong,
    #[error("Please select a subject.")]
    MissingSubject,
    #[error("Subject must be at most {} characters.", limits::SUBJECT_MAX)]
    SubjectTooLong,
    #[error("Message must be at least {} characters.", limits::MESSAGE_MIN)]
    MessageTooShort,
    #[error("Message must be at most {} characters.", limits::MESSAGE_MAX)]
    MessageTooLong,
}

/// Raw contact input as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// A contact request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Trim every field and check it against [`limits`].
    ///
    /// A blank phone number counts as no phone number.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContactError`] found, checking fields in form order.
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if char_len(name) > limits::NAME_MAX {
            return Err(ContactError::NameTooLong);
        }

        let email = Email::parse(&self.email).map_err(ContactError::InvalidEmail)?;

        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty());
        if phone.is_some_and(|phone| char_len(phone) > limits::PHONE_MAX) {
            return Err(ContactError::PhoneTooLong);
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ContactError::MissingSubject);
        }
        if char_len(subject) > limits::SUBJECT_MAX {
            return Err(ContactError::SubjectTooLong);
        }

        let message = self.message.trim();
        if char_len(message) < limits::MESSAGE_MIN {
            return Err(ContactError::MessageTooShort);
        }
        if char_len(message) > limits::MESSAGE_MAX {
            return Err(ContactError::MessageTooLong);
        }

        Ok(ValidContact {
            name: name.to_owned(),
            email,
            phone: phone.map(str::to_owned),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

impl From<&ValidContact> for ContactForm {
    fn from(contact: &ValidContact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.to_string(),
            phone: contact.phone.clone(),
            subject: contact.subject.clone(),
            message: contact.message.clone(),
        }
    }
}

/// A stored contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Stamp a validated contact with a fresh id and the current time.
    #[must_use]
    pub fn new(contact: ValidContact) -> Self {
        Self {
            id: SubmissionId::generate(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            phone: None,
            subject: "Catering Services".to_string(),
            message: "Do you cater office breakfasts?".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let contact = form().validate().unwrap();
        assert_eq!(contact.name, "Sarah Johnson");
        assert_eq!(contact.email.as_str(), "sarah@example.com");
        assert!(contact.phone.is_none());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut input = form();
        input.name = "  Mike Chen ".to_string();
        input.phone = Some("  (555) 123-4567 ".to_string());
        input.message = "   Ten chars!   ".to_string();
        let contact = input.validate().unwrap();
        assert_eq!(contact.name, "Mike Chen");
        assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(contact.message, "Ten chars!");
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let mut input = form();
        input.phone = Some("   ".to_string());
        assert!(input.validate().unwrap().phone.is_none());
    }

    #[test]
    fn test_message_length_boundary() {
        let mut input = form();
        input.message = "123456789".to_string();
        assert_eq!(input.validate(), Err(ContactError::MessageTooShort));
        input.message = "1234567890".to_string();
        assert!(input.validate().is_ok());
        input.message = "x".repeat(limits::MESSAGE_MAX + 1);
        assert_eq!(input.validate(), Err(ContactError::MessageTooLong));
    }

    #[test]
    fn test_required_fields() {
        let mut input = form();
        input.name = "   ".to_string();
        assert_eq!(input.validate(), Err(ContactError::MissingName));

        let mut input = form();
        input.subject = String::new();
        assert_eq!(input.validate(), Err(ContactError::MissingSubject));

        let mut input = form();
        input.email = "sarah".to_string();
        assert!(matches!(
            input.validate(),
            Err(ContactError::InvalidEmail(EmailError::AtSymbol))
        ));
    }

    #[test]
    fn test_length_limits_count_characters() {
        let mut input = form();
        input.name = "é".repeat(limits::NAME_MAX);
        assert!(input.validate().is_ok());
        input.name.push('é');
        assert_eq!(input.validate(), Err(ContactError::NameTooLong));

        let mut input = form();
        input.phone = Some("1".repeat(limits::PHONE_MAX + 1));
        assert_eq!(input.validate(), Err(ContactError::PhoneTooLong));

        let mut input = form();
        input.subject = "s".repeat(limits::SUBJECT_MAX + 1);
        assert_eq!(input.validate(), Err(ContactError::SubjectTooLong));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ContactError::MessageTooShort.to_string(),
            "Message must be at least 10 characters."
        );
        assert_eq!(
            ContactError::InvalidEmail(EmailError::Empty).to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_submission_serializes_for_api() {
        let submission = ContactSubmission::new(form().validate().unwrap());
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["email"], "sarah@example.com");
        assert_eq!(json["phone"], serde_json::Value::Null);
        assert!(json["id"].is_string());
        assert!(json["created_at"].is_string());
    }
}
