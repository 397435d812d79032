//! Contact Us enquiry form.
//!
//! Visitors submit a lead that is validated locally, then written to the
//! CMS `enquiry-leads` collection. Whatever happens, the submitted values
//! are echoed back so the form keeps its state.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::cms::{CmsClient, endpoints};
use crate::error::{CmsError, ContactError};

/// Shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Thank you for reaching out. Our team will get back to you shortly.";
/// Shown when the CMS could not store the lead.
pub const FAILURE_MESSAGE: &str = "Something went wrong while submitting your enquiry. Please try again.";

const MAX_MESSAGE_LEN: usize = 2000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .unwrap_or_else(|e| unreachable!("email regex: {e}"))
});

/// A Contact Us submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnquiryLead {
    /// Visitor's full name (required)
    pub full_name: String,
    /// Reply address (required)
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Company or institution
    pub organization: String,
    /// Country of residence
    pub country: String,
    /// Enquiry category, e.g. "Business", "Media", "Careers"
    pub enquiry_type: String,
    /// Free-text message (required)
    pub message: String,
}

impl EnquiryLead {
    /// Trims every field.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.full_name,
            &mut self.email,
            &mut self.phone,
            &mut self.organization,
            &mut self.country,
            &mut self.enquiry_type,
            &mut self.message,
        ] {
            let t = field.trim();
            if t.len() != field.len() {
                *field = t.to_string();
            }
        }
        self
    }

    /// Checks required fields, then the email format.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Invalid`] with the message to show.
    pub fn validate(&self) -> Result<(), ContactError> {
        let missing: Vec<&str> = [
            ("Full name", &self.full_name),
            ("Email", &self.email),
            ("Message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect();
        if !missing.is_empty() {
            return Err(ContactError::Invalid(format!(
                "Please fill in the required fields: {}.",
                missing.join(", ")
            )));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactError::Invalid(
                "Please enter a valid email address.".to_string(),
            ));
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ContactError::Invalid(format!(
                "Message must be at most {MAX_MESSAGE_LEN} characters."
            )));
        }
        Ok(())
    }
}

/// Outcome banner above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum FormStatus {
    /// Lead stored
    Success(String),
    /// Validation or submission failed
    Error(String),
}

/// Form values plus the last outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormState {
    /// Values to pre-fill
    pub values: EnquiryLead,
    /// Outcome of the last submission, if any
    pub status: Option<FormStatus>,
}

impl ContactFormState {
    /// State after a submission attempt. A success clears the form.
    #[must_use]
    pub fn after_submit(values: EnquiryLead, result: &Result<(), ContactError>) -> Self {
        match result {
            Ok(()) => Self {
                values: EnquiryLead::default(),
                status: Some(FormStatus::Success(SUCCESS_MESSAGE.to_string())),
            },
            Err(e) => Self {
                values,
                status: Some(FormStatus::Error(e.to_string())),
            },
        }
    }
}

/// Validates `lead` and stores it in the CMS.
///
/// # Errors
///
/// [`ContactError::Invalid`] when validation fails (nothing is sent), or
/// [`ContactError::Submission`] when the CMS rejects or never receives the
/// lead. A CMS validation message is passed through to the visitor.
pub async fn submit_enquiry(cms: &dyn CmsClient, lead: &EnquiryLead) -> Result<(), ContactError> {
    lead.validate()?;

    let body = json!({ "data": lead });
    match cms.create(endpoints::ENQUIRY_LEADS, &body).await {
        Ok(created) => {
            let id = created.get("data").and_then(|d| d.get("id")).cloned();
            info!(id = ?id, enquiry_type = %lead.enquiry_type, "enquiry lead stored");
            Ok(())
        }
        Err(CmsError::HttpStatus {
            status,
            message: Some(message),
            ..
        }) if status == 400 => {
            warn!(status, %message, "CMS rejected enquiry lead");
            Err(ContactError::Submission(message))
        }
        Err(e) => {
            warn!(error = %e, "enquiry lead submission failed");
            Err(ContactError::Submission(FAILURE_MESSAGE.to_string()))
        }
    }
}
