use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    otp::OtpCode,
    principal::Principal,
};

/// Delivery of the plaintext one-time code to the user.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send_two_factor_code(&self, recipient: &Email, code: &OtpCode) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Failed to sign token: {0}")]
    SigningError(String),
}

/// Stateless minting and validation of signed tokens.
///
/// Validation returns `None` on any cryptographic or expiry failure - a
/// principal is never partially extracted from an invalid token. Refresh
/// tokens carry a narrower claim set, so refresh validation yields only the
/// subject id.
pub trait TokenService: Send + Sync {
    fn generate_access_token(&self, account: &Account) -> Result<String, TokenServiceError>;
    fn generate_refresh_token(&self, account: &Account) -> Result<String, TokenServiceError>;
    fn validate_access_token(&self, token: &str) -> Option<Principal>;
    fn validate_refresh_token(&self, token: &str) -> Option<AccountId>;
}
