//! Contact form controller: owns one form instance's state machine.
//!
//! idle → submitting → {succeeded, failed}; editing a field after a terminal
//! state returns the form to idle. The `submitting` status doubles as the
//! in-flight gate: at most one submission per controller reaches the API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api_client::ContactApi;
use crate::contact::fields::{ContactField, ContactFields, ValidationErrors};
use crate::contact::validation::{validate_with, ValidationRules};
use crate::models::contact::SubmissionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded | SubmissionStatus::Failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    pub fields: ContactFields,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
    /// General message not tied to a field: success text, or a failure with
    /// no per-field detail.
    pub notice: Option<String>,
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    /// Identifies this form instance across posts.
    pub form_id: Uuid,
    pub fields: ContactFields,
    pub errors: ValidationErrors,
    pub is_submitting: bool,
    pub status: SubmissionStatus,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing was sent.
    AlreadySubmitting,
    /// Local validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The API client was called and returned this result.
    Sent(SubmissionResult),
}

pub struct ContactFormController {
    id: Uuid,
    api: Arc<dyn ContactApi>,
    rules: ValidationRules,
    state: Mutex<ContactFormState>,
}

impl ContactFormController {
    /// A freshly mounted form: empty fields, idle.
    pub fn new(api: Arc<dyn ContactApi>, rules: ValidationRules) -> Self {
        Self::with_id(Uuid::new_v4(), api, rules)
    }

    pub fn with_id(id: Uuid, api: Arc<dyn ContactApi>, rules: ValidationRules) -> Self {
        Self {
            id,
            api,
            rules,
            state: Mutex::new(ContactFormState::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, ContactFormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one keystroke-level edit. Returns false (and changes nothing)
    /// for unknown field names or while a submission is in flight.
    pub fn handle_input_change(&self, field_name: &str, value: impl Into<String>) -> bool {
        let field = match field_name.parse::<ContactField>() {
            Ok(f) => f,
            Err(e) => {
                debug!("Ignoring input change: {e}");
                return false;
            }
        };

        let mut state = self.lock();
        if state.status == SubmissionStatus::Submitting {
            debug!(field = %field, "Ignoring input change while submitting");
            return false;
        }

        state.fields.set(field, value.into());
        state.errors.remove(&field);

        if state.status.is_terminal() {
            state.status = SubmissionStatus::Idle;
            state.notice = None;
        }
        true
    }

    /// Validates and, if the form is clean, sends it through the API client.
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.lock();
            if state.status == SubmissionStatus::Submitting {
                debug!(form_id = %self.id, "Submission already in flight; ignoring submit");
                return SubmitOutcome::AlreadySubmitting;
            }

            let errors = validate_with(&state.fields, &self.rules);
            if !errors.is_empty() {
                debug!(invalid_fields = errors.len(), "Contact form failed validation");
                state.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }

            state.errors.clear();
            state.notice = None;
            state.status = SubmissionStatus::Submitting;
            state.fields.to_payload()
        };

        let result = self.api.submit_contact(&payload).await;

        let mut state = self.lock();
        if result.success {
            info!("Contact form submitted");
            state.status = SubmissionStatus::Succeeded;
            state.notice = Some(result.message.clone());
            state.fields.clear();
        } else {
            state.status = SubmissionStatus::Failed;
            let mut merged = 0;
            for (name, msg) in &result.errors {
                match name.parse::<ContactField>() {
                    Ok(field) => {
                        state.errors.insert(field, msg.clone());
                        merged += 1;
                    }
                    Err(e) => debug!("Dropping server error: {e}"),
                }
            }
            if merged == 0 {
                state.notice = Some(result.message.clone());
            }
            warn!(
                failure = ?result.failure,
                field_errors = merged,
                "Contact form submission failed"
            );
        }

        SubmitOutcome::Sent(result)
    }

    pub fn view(&self) -> FormView {
        let state = self.lock();
        FormView {
            form_id: self.id,
            fields: state.fields.clone(),
            errors: state.errors.clone(),
            is_submitting: state.status == SubmissionStatus::Submitting,
            status: state.status,
            notice: state.notice.clone(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ContactFormState {
        self.lock().clone()
    }
}
