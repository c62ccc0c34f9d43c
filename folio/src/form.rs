use std::sync::LazyLock;

use regex::Regex;

use crate::Messages;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// `local@domain.tld`-style check: no whitespace or extra `@`, and a dot with at least one
/// char on each side somewhere after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// The required contact-form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Raw form values as read from the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Trims and validates the fields, stopping at the first failure.
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        for (field, value) in [
            (Field::Name, name),
            (Field::Email, email),
            (Field::Message, message),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Submission {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }
}

/// A validated, trimmed submission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(Field),
    InvalidEmail,
}

impl ValidationError {
    /// The notification text shown for this error.
    pub fn user_message<'a>(&self, messages: &'a Messages) -> &'a str {
        match self {
            Self::MissingField(_) => &messages.missing_fields,
            Self::InvalidEmail => &messages.invalid_email,
        }
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{}` is empty", field.as_str()),
            Self::InvalidEmail => f.write_str("email address is malformed"),
        }
    }
}

impl std::error::Error for ValidationError {}
