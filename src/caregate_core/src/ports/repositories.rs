use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    otp::{LoginOtpRequest, OtpRequestId},
    password::Password,
    profile::UserProfile,
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Password rejected by policy")]
    RejectedPassword(Vec<String>),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists) => true,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::RejectedPassword(_), Self::RejectedPassword(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence of accounts and their password hashes.
///
/// The weak-credential policy lives behind `create`; its reasons come back
/// verbatim in `RejectedPassword` so the caller can surface them unchanged.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, CredentialStoreError>;
    async fn create(&self, account: Account, password: Password)
    -> Result<(), CredentialStoreError>;
    async fn check_password(
        &self,
        id: AccountId,
        password: &Password,
    ) -> Result<bool, CredentialStoreError>;
}

// ProfileStore port trait and errors
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Profile already exists")]
    ProfileAlreadyExists,
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for ProfileStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ProfileAlreadyExists, Self::ProfileAlreadyExists) => true,
            (Self::ProfileNotFound, Self::ProfileNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: UserProfile) -> Result<(), ProfileStoreError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserProfile>, ProfileStoreError>;
}

// OtpStore port trait and errors
#[derive(Debug, Error)]
pub enum OtpStoreError {
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Persistence of live two-factor challenges, keyed by request id.
///
/// There is deliberately no `get` + `delete` pair: `take` removes and
/// returns the record in one step, so two concurrent completion attempts for
/// the same id cannot both observe a live record.
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn create(&self, request: LoginOtpRequest) -> Result<(), OtpStoreError>;
    async fn take(&self, id: OtpRequestId) -> Result<Option<LoginOtpRequest>, OtpStoreError>;
}
