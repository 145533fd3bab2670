use chrono::Duration;
use thiserror::Error;

use caregate_core::{
    AccountId, CredentialStore, CredentialStoreError, Email, NotificationGateway, OtpCode,
    OtpRequestId, OtpStore, Password, ProfileStore, ProfileStoreError, TokenService, UserProfile,
};

use crate::auth_result::AuthResult;
use crate::use_cases::{
    complete_two_factor::CompleteTwoFactorUseCase,
    initiate_two_factor::{InitiateTwoFactorError, InitiateTwoFactorUseCase},
    login::LoginUseCase,
    refresh_token::RefreshTokenUseCase,
    register::{RegisterRequest, RegisterUseCase},
};

/// Errors from the credential-checked two-factor step-up.
#[derive(Debug, Error)]
pub enum StepUpError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Initiate(#[from] InitiateTwoFactorError),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Facade over the authentication use cases, generic over the port
/// implementations.
///
/// Stores implement Clone via internal shared state where they need it; the
/// service itself owns one instance of each and hands references to the use
/// cases per call.
pub struct AuthenticationService<C, P, O, N, K>
where
    C: CredentialStore,
    P: ProfileStore,
    O: OtpStore,
    N: NotificationGateway,
    K: TokenService,
{
    credential_store: C,
    profile_store: P,
    otp_store: O,
    notification_gateway: N,
    token_service: K,
    otp_ttl: Duration,
}

impl<C, P, O, N, K> AuthenticationService<C, P, O, N, K>
where
    C: CredentialStore,
    P: ProfileStore,
    O: OtpStore,
    N: NotificationGateway,
    K: TokenService,
{
    pub fn new(
        credential_store: C,
        profile_store: P,
        otp_store: O,
        notification_gateway: N,
        token_service: K,
        otp_ttl: Duration,
    ) -> Self {
        Self {
            credential_store,
            profile_store,
            otp_store,
            notification_gateway,
            token_service,
            otp_ttl,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AuthResult {
        RegisterUseCase::new(
            &self.credential_store,
            &self.profile_store,
            &self.token_service,
        )
        .execute(request)
        .await
    }

    pub async fn login(&self, email: &Email, password: &Password) -> AuthResult {
        LoginUseCase::new(&self.credential_store, &self.token_service)
            .execute(email, password)
            .await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AuthResult {
        RefreshTokenUseCase::new(&self.credential_store, &self.token_service)
            .execute(refresh_token)
            .await
    }

    pub async fn initiate_two_factor(
        &self,
        account_id: AccountId,
    ) -> Result<OtpRequestId, InitiateTwoFactorError> {
        InitiateTwoFactorUseCase::new(
            &self.credential_store,
            &self.otp_store,
            &self.notification_gateway,
            self.otp_ttl,
        )
        .execute(account_id)
        .await
    }

    /// Credential-checked step-up: verifies the primary factor first, then
    /// starts the one-time-code handshake for the matching account.
    pub async fn initiate_two_factor_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<OtpRequestId, StepUpError> {
        let account = self
            .credential_store
            .find_by_email(email)
            .await
            .map_err(|e| StepUpError::Unexpected(e.to_string()))?
            .ok_or(StepUpError::InvalidCredentials)?;

        match self
            .credential_store
            .check_password(account.id(), password)
            .await
        {
            Ok(true) => {}
            Ok(false)
            | Err(CredentialStoreError::IncorrectPassword)
            | Err(CredentialStoreError::AccountNotFound) => {
                return Err(StepUpError::InvalidCredentials);
            }
            Err(e) => return Err(StepUpError::Unexpected(e.to_string())),
        }

        Ok(self.initiate_two_factor(account.id()).await?)
    }

    pub async fn complete_two_factor(
        &self,
        request_id: OtpRequestId,
        code: &OtpCode,
    ) -> AuthResult {
        CompleteTwoFactorUseCase::new(
            &self.credential_store,
            &self.otp_store,
            &self.token_service,
        )
        .execute(request_id, code)
        .await
    }

    pub async fn find_profile(
        &self,
        id: AccountId,
    ) -> Result<Option<UserProfile>, ProfileStoreError> {
        self.profile_store.find_by_id(id).await
    }

    /// The token service, for resolving principals at the transport layer.
    pub fn token_service(&self) -> &K {
        &self.token_service
    }
}
