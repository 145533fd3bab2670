use serde::Serialize;
use thiserror::Error;

/// Taxonomy of expected authentication failures.
///
/// The `Display` text is the user-visible message. `InvalidCredentials` is
/// deliberately the same whether the email was unknown or the password was
/// wrong. `Unexpected` keeps its detail for logs only; the serialized
/// message stays generic.
#[derive(Debug, Clone, Error)]
pub enum AuthFailure {
    #[error("User with this email already exists")]
    AlreadyExists,
    #[error("User creation failed")]
    WeakCredential(Vec<String>),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid refresh token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid verification request")]
    InvalidRequest,
    #[error("Verification code has expired")]
    Expired,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Something went wrong")]
    Unexpected(String),
}

impl PartialEq for AuthFailure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlreadyExists, Self::AlreadyExists) => true,
            (Self::WeakCredential(_), Self::WeakCredential(_)) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::InvalidToken, Self::InvalidToken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::InvalidRequest, Self::InvalidRequest) => true,
            (Self::Expired, Self::Expired) => true,
            (Self::InvalidCode, Self::InvalidCode) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Transport value returned by every authentication operation.
///
/// Constructors enforce the shape: token fields are populated only on
/// success, the error list only on failure. The failure tag is for in-process
/// callers (status mapping, tests) and never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip)]
    pub failure: Option<AuthFailure>,
}

impl AuthResult {
    pub fn succeeded(token: String) -> Self {
        Self {
            success: true,
            message: String::new(),
            token: Some(token),
            refresh_token: None,
            errors: Vec::new(),
            failure: None,
        }
    }

    pub fn succeeded_with_refresh(token: String, refresh_token: String) -> Self {
        Self {
            refresh_token: Some(refresh_token),
            ..Self::succeeded(token)
        }
    }

    pub fn failed(failure: AuthFailure) -> Self {
        let errors = match &failure {
            AuthFailure::WeakCredential(reasons) => reasons.clone(),
            _ => Vec::new(),
        };
        Self {
            success: false,
            message: failure.to_string(),
            token: None,
            refresh_token: None,
            errors,
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
