//! Contact form state: field values, validation, submission status.
//!
//! The status runs `Idle -> Submitting -> Success | Error -> Idle`. The
//! return to `Idle` happens after a fixed delay on the form's own clock,
//! advanced by [`ContactForm::tick`]. Any later status change supersedes a
//! pending reset.

use std::collections::BTreeMap;

use regex::Regex;

use folio_platform::{DeferredQueue, FormRelay, FormSubmission, RelayResponse};
use folio_types::Language;
use folio_types::config::{FORM_RESET_DELAY_MS, FolioConfig};
use folio_types::error::{FolioError, Result};
use folio_types::event::FormField;

use crate::i18n::contact_text;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

/// Submission status shown by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

/// Validation failure for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    NameRequired,
    EmailRequired,
    EmailInvalid,
    MessageRequired,
}

impl FieldError {
    pub fn message(self, language: Language) -> &'static str {
        let text = contact_text(language);
        match self {
            Self::NameRequired => text.name_required,
            Self::EmailRequired => text.email_required,
            Self::EmailInvalid => text.email_invalid,
            Self::MessageRequired => text.message_required,
        }
    }
}

/// The contact form.
#[derive(Debug)]
pub struct ContactForm {
    values: FormSubmission,
    errors: BTreeMap<FormField, FieldError>,
    status: FormStatus,
    email_pattern: Regex,
    /// Pending returns to `Idle`, tagged with the status generation that
    /// scheduled them.
    resets: DeferredQueue<u64>,
    generation: u64,
    reset_delay_ms: u64,
}

impl ContactForm {
    pub fn new() -> Result<Self> {
        Self::with_reset_delay(FORM_RESET_DELAY_MS)
    }

    pub fn with_reset_delay(reset_delay_ms: u64) -> Result<Self> {
        let email_pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| FolioError::Form(format!("email pattern: {e}")))?;
        Ok(Self {
            values: FormSubmission::default(),
            errors: BTreeMap::new(),
            status: FormStatus::Idle,
            email_pattern,
            resets: DeferredQueue::new(),
            generation: 0,
            reset_delay_ms,
        })
    }

    pub fn from_config(config: &FolioConfig) -> Result<Self> {
        Self::with_reset_delay(config.form_reset_delay_ms)
    }

    pub fn values(&self) -> &FormSubmission {
        &self.values
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.values.name,
            FormField::Email => &self.values.email,
            FormField::Message => &self.values.message,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self, field: FormField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Update a field. Editing a field clears its validation error.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Name => &mut self.values.name,
            FormField::Email => &mut self.values.email,
            FormField::Message => &mut self.values.message,
        };
        *slot = value.to_string();
        self.errors.remove(&field);
    }

    /// Check every field, replacing the previous error set.
    /// Returns `true` when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();

        if self.values.name.trim().is_empty() {
            self.errors.insert(FormField::Name, FieldError::NameRequired);
        }

        if self.values.email.trim().is_empty() {
            self.errors.insert(FormField::Email, FieldError::EmailRequired);
        } else if !self.email_pattern.is_match(&self.values.email) {
            self.errors.insert(FormField::Email, FieldError::EmailInvalid);
        }

        if self.values.message.trim().is_empty() {
            self.errors
                .insert(FormField::Message, FieldError::MessageRequired);
        }

        if !self.errors.is_empty() {
            log::debug!("Contact form rejected: {:?}", self.errors);
        }
        self.errors.is_empty()
    }

    /// Validate and enter `Submitting`. Returns the payload to post, or
    /// `None` when validation failed or a submission is already running.
    pub fn begin_submit(&mut self) -> Option<FormSubmission> {
        if self.status == FormStatus::Submitting {
            return None;
        }
        if !self.validate() {
            return None;
        }
        self.set_status(FormStatus::Submitting);
        Some(self.values.clone())
    }

    /// Record the relay outcome. A 2xx reply is success and clears the
    /// fields; anything else, including a transport failure, is an error.
    pub fn finish_submit(&mut self, outcome: Result<RelayResponse>) -> FormStatus {
        if self.status != FormStatus::Submitting {
            log::warn!("Ignoring form relay outcome: no submission in progress");
            return self.status;
        }
        match outcome {
            Ok(resp) if resp.is_success() => {
                log::info!("Contact form delivered ({})", resp.status_code);
                self.values = FormSubmission::default();
                self.set_status(FormStatus::Success);
            },
            Ok(resp) => {
                log::warn!("Contact form rejected by relay ({})", resp.status_code);
                self.set_status(FormStatus::Error);
            },
            Err(e) => {
                log::warn!("Contact form submission failed: {e}");
                self.set_status(FormStatus::Error);
            },
        }
        self.status
    }

    /// Validate, post once through `relay`, and record the outcome.
    pub fn submit<R: FormRelay + ?Sized>(&mut self, relay: &mut R, endpoint: &str) -> FormStatus {
        match self.begin_submit() {
            Some(payload) => {
                let outcome = relay.submit(endpoint, &payload);
                self.finish_submit(outcome)
            },
            None => self.status,
        }
    }

    /// Advance the form clock; returns `true` if the status went back to
    /// `Idle`.
    pub fn tick(&mut self, dt_ms: u64) -> bool {
        let current = self.generation;
        let fired = self.resets.advance(dt_ms);
        let reset = fired.contains(&current)
            && matches!(self.status, FormStatus::Success | FormStatus::Error);
        if reset {
            self.status = FormStatus::Idle;
            log::debug!("Contact form status reset");
        }
        reset
    }

    /// Banner text for the current status, if one is shown.
    pub fn banner(&self, language: Language) -> Option<&'static str> {
        let text = contact_text(language);
        match self.status {
            FormStatus::Success => Some(text.success),
            FormStatus::Error => Some(text.error),
            FormStatus::Idle | FormStatus::Submitting => None,
        }
    }

    /// Submit button caption.
    pub fn submit_caption(&self, language: Language) -> &'static str {
        let text = contact_text(language);
        if self.status == FormStatus::Submitting {
            text.sending
        } else {
            text.send
        }
    }

    fn set_status(&mut self, status: FormStatus) {
        self.status = status;
        self.generation += 1;
        if matches!(status, FormStatus::Success | FormStatus::Error) {
            self.resets.schedule(self.reset_delay_ms, self.generation);
        }
    }
}
