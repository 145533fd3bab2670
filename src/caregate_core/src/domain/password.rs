use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,
}

/// Plaintext password in transit.
///
/// Only the basic length check lives here; the full weak-credential policy
/// belongs to the credential store, which reports its reasons as an error
/// list. Passwords are never stored - stores persist a hash.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_of_minimum_length_is_accepted() {
        let result = Password::try_from(Secret::from("12345678".to_string()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let result = Password::try_from(Secret::from("1234567".to_string()));
        assert_eq!(result.unwrap_err(), PasswordError::TooShort);
    }

    #[test]
    fn test_equal_passwords_compare_equal() {
        let a = Password::try_from(Secret::from("correct horse".to_string())).unwrap();
        let b = Password::try_from(Secret::from("correct horse".to_string())).unwrap();
        assert_eq!(a, b);
    }
}
