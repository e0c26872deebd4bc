//! The contact form state machine.
//!
//! ```text
//! Idle ──submit(valid)──▶ Submitting ──success──▶ Success ──reset──▶ Idle
//!   ▲                         │
//!   └──── input / submit ─── Failed ◀──failure──┘
//! ```
//!
//! The controller owns the field values, the per-field validation outcome and
//! the draft store. It never touches the DOM; the view reads the queries at the
//! bottom of the impl and renders from them.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use super::analytics::{Analytics, AnalyticsEvent};
use super::draft::{DraftStore, KeyValueStore};
use super::error::SubmissionError;
use super::fields::{validate, Field, FieldState, FormValues, ValidationError};
use super::transport::{format_timestamp, EndpointResponse, SubmissionPayload};
use crate::config::ContactConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Dismissible error banner shown above the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// The view hides the notice on its own after this long.
    pub dismiss_after_ms: u32,
}

impl Notice {
    fn submission_failed(fallback_email: &str, dismiss_after_ms: u32) -> Self {
        Self {
            message: format!(
                "Oops! Something went wrong. Please try again or email me directly at {}",
                fallback_email
            ),
            dismiss_after_ms,
        }
    }
}

pub struct ContactFormController<S> {
    values: FormValues,
    checked: BTreeMap<Field, FieldState>,
    state: SubmissionState,
    notice: Option<Notice>,
    in_flight: Option<SubmissionPayload>,
    drafts: DraftStore<S>,
    analytics: Rc<dyn Analytics>,
    access_key: String,
    subject: Option<String>,
    fallback_email: String,
    notice_timeout_ms: u32,
}

impl<S: KeyValueStore> ContactFormController<S> {
    /// Builds the controller and restores any saved draft.
    pub fn new(
        config: &ContactConfig,
        drafts: DraftStore<S>,
        analytics: Rc<dyn Analytics>,
    ) -> Self {
        let values = drafts.load().unwrap_or_default();
        if !values.is_empty() {
            info!("Restored contact form draft");
        }

        Self {
            values,
            checked: BTreeMap::new(),
            state: SubmissionState::Idle,
            notice: None,
            in_flight: None,
            drafts,
            analytics,
            access_key: config.access_key.clone(),
            subject: config.subject.clone(),
            fallback_email: config.fallback_email.clone(),
            notice_timeout_ms: config.notice_timeout_ms,
        }
    }

    pub fn on_input(&mut self, field: Field, value: String) {
        self.values.set(field, value);
        if self.checked.get(&field).is_some_and(|state| !state.is_valid()) {
            self.checked.remove(&field);
        }
        if self.state == SubmissionState::Failed {
            self.state = SubmissionState::Idle;
        }
        self.drafts.save(&self.values);
    }

    pub fn on_blur(&mut self, field: Field) {
        let state = validate(field, self.values.get(field));
        self.checked.insert(field, state);
    }

    /// Validates everything and, if the form is acceptable, moves to
    /// `Submitting` and returns the payload to send.
    pub fn begin_submit(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<SubmissionPayload, SubmissionError> {
        match self.state {
            SubmissionState::Submitting | SubmissionState::Success => {
                debug!("Submit ignored while {}", self.state);
                return Err(SubmissionError::NotAccepting(self.state));
            }
            SubmissionState::Idle | SubmissionState::Failed => {}
        }

        let mut first_invalid = None;
        for field in Field::ALL {
            let state = validate(field, self.values.get(field));
            if !state.is_valid() && first_invalid.is_none() {
                first_invalid = Some(field);
            }
            self.checked.insert(field, state);
        }

        if let Some(field) = first_invalid {
            self.state = SubmissionState::Idle;
            info!("Contact form rejected, first invalid field: {}", field);
            return Err(SubmissionError::Invalid { field });
        }

        // Every field was just checked, so these are the trimmed, valid values.
        let checked = |field: Field| {
            self.checked
                .get(&field)
                .map(|state| state.value().to_string())
                .unwrap_or_default()
        };
        let payload = SubmissionPayload {
            access_key: self.access_key.clone(),
            name: checked(Field::Name),
            email: checked(Field::Email),
            service: checked(Field::Service),
            budget: checked(Field::Budget),
            message: checked(Field::Message),
            timestamp: format_timestamp(at),
            subject: self.subject.clone(),
        };

        self.state = SubmissionState::Submitting;
        self.notice = None;
        self.in_flight = Some(payload.clone());
        info!("Submitting contact form");
        Ok(payload)
    }

    /// Applies the transport's answer to a submission started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<EndpointResponse, SubmissionError>,
    ) -> Result<(), SubmissionError> {
        if self.state != SubmissionState::Submitting {
            warn!("Dropping submission result that arrived while {}", self.state);
            return Err(SubmissionError::NotAccepting(self.state));
        }
        let sent = self.in_flight.take();

        let result = match outcome {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(SubmissionError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Form submission failed".to_string()),
            )),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => {
                info!("Contact form submitted");
                self.state = SubmissionState::Success;
                self.clear_fields();
                self.drafts.clear();
                if let Some(sent) = sent {
                    self.track(AnalyticsEvent::FormSubmission {
                        service: sent.service,
                        budget: sent.budget,
                    });
                }
            }
            Err(e) => {
                error!("Form submission error: {}", e);
                self.state = SubmissionState::Failed;
                self.notice = Some(Notice::submission_failed(
                    &self.fallback_email,
                    self.notice_timeout_ms,
                ));
            }
        }
        result
    }

    /// "Send another message".
    pub fn reset(&mut self) {
        if self.state == SubmissionState::Submitting {
            debug!("Reset ignored while a submission is in flight");
            return;
        }
        self.state = SubmissionState::Idle;
        self.notice = None;
        self.clear_fields();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn clear_fields(&mut self) {
        self.values = FormValues::default();
        self.checked.clear();
    }

    fn track(&self, event: AnalyticsEvent) {
        if let Err(e) = self.analytics.track(&event) {
            debug!("Analytics skipped: {}", e);
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Last validation outcome for `field`, if it has been checked since it
    /// was last edited.
    pub fn field_state(&self, field: Field) -> Option<&FieldState> {
        self.checked.get(&field)
    }

    /// The error indicator for `field` is shown exactly when this is `Some`.
    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.checked.get(&field).and_then(FieldState::error)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn form_visible(&self) -> bool {
        self.state != SubmissionState::Success
    }

    pub fn success_visible(&self) -> bool {
        self.state == SubmissionState::Success
    }

    pub fn submit_enabled(&self) -> bool {
        self.state != SubmissionState::Submitting
    }

    pub fn loading(&self) -> bool {
        self.state == SubmissionState::Submitting
    }
}
