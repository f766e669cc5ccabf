use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::contact::ContactPayload;

/// The three inputs of the contact form. Nothing else is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown contact field '{0}'")]
pub struct UnknownField(pub String);

/// Validation messages keyed by field. A field is present only when invalid.
pub type ValidationErrors = BTreeMap<ContactField, String>;

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "message" => Ok(ContactField::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Current values of the form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Request body for the backend, with surrounding whitespace removed.
    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        for field in ContactField::ALL {
            assert_eq!(field.as_str().parse::<ContactField>().unwrap(), field);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_miscased_names() {
        assert_eq!(
            "phone".parse::<ContactField>(),
            Err(UnknownField("phone".to_string()))
        );
        assert!("Name".parse::<ContactField>().is_err());
        assert!("".parse::<ContactField>().is_err());
    }

    #[test]
    fn test_set_touches_only_one_field() {
        let mut fields = ContactFields::default();
        fields.set(ContactField::Email, "a@b.com".to_string());
        assert_eq!(fields.get(ContactField::Email), "a@b.com");
        assert_eq!(fields.name, "");
        assert_eq!(fields.message, "");
    }

    #[test]
    fn test_payload_is_trimmed() {
        let fields = ContactFields {
            name: "  Ada ".to_string(),
            email: " ada@example.com\n".to_string(),
            message: "\thello there ".to_string(),
        };
        let payload = fields.to_payload();
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.message, "hello there");
    }
}
