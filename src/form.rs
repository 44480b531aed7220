//! Club join form.
//!
//! [`JoinForm::submit`] validates the fields, posts them form-encoded to a
//! [`FormEndpoint`] and reports the outcome through a [`Notifier`]. A valid
//! form makes exactly one endpoint call; an invalid one makes none.
//!
//! ```
//! use treebites::form::{is_valid_email, JoinForm};
//!
//! assert!(is_valid_email("a@b.co"));
//! assert!(!is_valid_email("a@b"));
//!
//! let form = JoinForm::new("Sustainability Club", "Jane Doe", "jane@stanford.edu");
//! assert!(form.validate().is_ok());
//! ```

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use ureq::Agent;

use crate::error::{FormError, SubmitError, ValidationError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A user-facing message about a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: Variant,
}

impl Notification {
    pub const MISSING_FIELDS: Notification = Notification {
        title: "Missing Information",
        description: "Please fill in all required fields",
        variant: Variant::Destructive,
    };

    pub const INVALID_EMAIL: Notification = Notification {
        title: "Invalid Email",
        description: "Please enter a valid email address",
        variant: Variant::Destructive,
    };

    pub const WELCOME: Notification = Notification {
        title: "Welcome to Tree Bites!",
        description: "We'll be in touch soon with early access details.",
        variant: Variant::Default,
    };

    pub const SUBMISSION_FAILED: Notification = Notification {
        title: "Submission Failed",
        description: "Something went wrong. Please try again later.",
        variant: Variant::Destructive,
    };

    pub fn for_validation(error: &ValidationError) -> Self {
        match error {
            ValidationError::MissingField(_) => Self::MISSING_FIELDS,
            ValidationError::InvalidEmail => Self::INVALID_EMAIL,
        }
    }
}

/// Receives submission outcomes.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.variant {
            Variant::Default => tracing::info!(title = n.title, "{}", n.description),
            Variant::Destructive => tracing::warn!(title = n.title, "{}", n.description),
        }
    }
}

/// Somewhere a completed form can be sent.
pub trait FormEndpoint {
    /// Deliver `fields` as one submission.
    fn submit(&self, fields: &[(&'static str, String)]) -> Result<(), SubmitError>;
}

/// Form-encoded POST to a third-party collection URL.
pub struct HttpEndpoint {
    url: String,
    agent: Agent,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            url: url.into(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FormEndpoint for HttpEndpoint {
    fn submit(&self, fields: &[(&'static str, String)]) -> Result<(), SubmitError> {
        let response = self
            .agent
            .post(&self.url)
            .header("Accept", "application/json")
            .send_form(fields.iter().map(|(k, v)| (*k, v.as_str())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }
        tracing::debug!(url = %self.url, status = status.as_u16(), "form accepted");
        Ok(())
    }
}

/// The "Join as a Club" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinForm {
    pub club_name: String,
    pub contact_person: String,
    pub email: String,
    /// Instagram handle or website.
    pub social_media: String,
    pub events_per_quarter: String,
    pub message: String,
    pub hosts_catered_events: bool,
    is_submitting: bool,
}

impl JoinForm {
    /// A form with the required fields filled in.
    pub fn new(
        club_name: impl Into<String>,
        contact_person: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            club_name: club_name.into(),
            contact_person: contact_person.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Required fields first, then the email format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("Club Name", &self.club_name),
            ("Contact Person", &self.contact_person),
            ("Email Address", &self.email),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(label));
            }
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Name/value pairs as posted. Text is trimmed.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("clubName", self.club_name.trim().to_string()),
            ("contactPerson", self.contact_person.trim().to_string()),
            ("email", self.email.trim().to_string()),
            ("socialMedia", self.social_media.trim().to_string()),
            ("eventsPerQuarter", self.events_per_quarter.trim().to_string()),
            ("message", self.message.trim().to_string()),
            ("hostsCateredEvents", self.hosts_catered_events.to_string()),
        ]
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and send the form.
    ///
    /// On success the form is reset. On failure the entered values are kept
    /// so the user can retry. Every outcome produces one notification.
    pub fn submit<E, N>(&mut self, endpoint: &E, notifier: &N) -> Result<(), FormError>
    where
        E: FormEndpoint + ?Sized,
        N: Notifier + ?Sized,
    {
        let fields = self.begin_submit(notifier)?;
        let result = endpoint.submit(&fields);
        self.finish_submit(result, notifier)
    }

    /// First half of [`submit`](Self::submit), for callers that send the
    /// fields themselves (for example on another thread).
    ///
    /// Validates and marks the form in flight, returning the fields to post.
    /// While in flight a second call is rejected with [`SubmitError::Busy`]
    /// and does nothing else.
    pub fn begin_submit<N>(&mut self, notifier: &N) -> Result<Vec<(&'static str, String)>, FormError>
    where
        N: Notifier + ?Sized,
    {
        if self.is_submitting {
            return Err(SubmitError::Busy.into());
        }

        if let Err(e) = self.validate() {
            tracing::debug!(error = %e, "join form rejected");
            notifier.notify(Notification::for_validation(&e));
            return Err(e.into());
        }

        self.is_submitting = true;
        Ok(self.form_fields())
    }

    /// Second half of [`submit`](Self::submit): record the endpoint's answer.
    pub fn finish_submit<N>(&mut self, result: Result<(), SubmitError>, notifier: &N) -> Result<(), FormError>
    where
        N: Notifier + ?Sized,
    {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(club = %self.club_name.trim(), "club signed up");
                notifier.notify(Notification::WELCOME);
                self.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "join form submission failed");
                notifier.notify(Notification::SUBMISSION_FAILED);
                Err(e.into())
            }
        }
    }
}
