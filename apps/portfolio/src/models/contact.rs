use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-field messages reported by the backend, keyed by the field name it used.
pub type FieldErrors = BTreeMap<String, String>;

/// JSON body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Why a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend answered with a non-success status.
    ServerRejection,
    /// No response arrived: connect failure, timeout, or no backend configured.
    NetworkFailure,
    /// The request could not be built or the response could not be read.
    UnexpectedClientFailure,
}

/// Normalized outcome of a contact submission. Only the API client builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl SubmissionResult {
    pub fn succeeded(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: FieldErrors::new(),
            data: Some(data),
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
            data: None,
            failure: Some(kind),
        }
    }
}
