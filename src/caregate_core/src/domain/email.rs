use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

#[derive(Debug, Error, PartialEq)]
pub enum EmailError {
    #[error("Invalid email address")]
    InvalidFormat,
}

/// Validated email address, normalized to lower case.
///
/// Emails are unique per account and the comparison is case-insensitive, so
/// normalization happens once at the boundary and every store can key by the
/// wrapped value directly.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = value.expose_secret().trim().to_lowercase();
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(Secret::from(normalized)))
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
