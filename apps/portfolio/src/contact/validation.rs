use lazy_static::lazy_static;
use regex::Regex;

use crate::contact::fields::{ContactField, ContactFields, ValidationErrors};

pub const DEFAULT_MIN_MESSAGE_LENGTH: usize = 10;
/// Upper bounds enforced by the contact backend.
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_MESSAGE_LENGTH: usize = 1000;

lazy_static! {
    /// local-part "@" domain containing a dot, no whitespace anywhere.
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

/// Tunable thresholds for contact form validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub min_message_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_message_length: DEFAULT_MIN_MESSAGE_LENGTH,
        }
    }
}

/// Validates form fields with the default rules.
#[cfg(test)]
pub fn validate(fields: &ContactFields) -> ValidationErrors {
    validate_with(fields, &ValidationRules::default())
}

/// Validates form fields, returning one message per invalid field.
/// An empty map means the form may be submitted.
pub fn validate_with(fields: &ContactFields, rules: &ValidationRules) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(msg) = check_name(&fields.name) {
        errors.insert(ContactField::Name, msg);
    }
    if let Some(msg) = check_email(&fields.email) {
        errors.insert(ContactField::Email, msg);
    }
    if let Some(msg) = check_message(&fields.message, rules) {
        errors.insert(ContactField::Message, msg);
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("Name is required".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!("Name must be less than {MAX_NAME_LENGTH} characters"));
    }
    None
}

fn check_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

fn check_message(message: &str, rules: &ValidationRules) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        return Some("Message is required".to_string());
    }
    let len = message.chars().count();
    if len < rules.min_message_length {
        return Some(format!(
            "Message must be at least {} characters long",
            rules.min_message_length
        ));
    }
    if len > MAX_MESSAGE_LENGTH {
        return Some(format!(
            "Message must be less than {MAX_MESSAGE_LENGTH} characters"
        ));
    }
    None
}
