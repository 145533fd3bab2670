pub mod authorization;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountId},
    email::{Email, EmailError},
    otp::{LoginOtpRequest, OtpCode, OtpCodeError, OtpCodeHash, OtpRequestId, OtpRequestIdError},
    password::{Password, PasswordError},
    principal::Principal,
    profile::UserProfile,
    role::{Role, RoleError},
};

pub use ports::{
    repositories::{
        CredentialStore, CredentialStoreError, OtpStore, OtpStoreError, ProfileStore,
        ProfileStoreError,
    },
    services::{NotificationGateway, TokenService, TokenServiceError},
};

pub use authorization::policy::{AccessDecision, AccessPolicy};
