use chrono::{Duration, Utc};
use thiserror::Error;

use caregate_core::{
    AccountId, CredentialStore, CredentialStoreError, LoginOtpRequest, NotificationGateway,
    OtpCode, OtpRequestId, OtpStore, OtpStoreError,
};

/// Error types for the initiate two-factor use case.
///
/// `AccountNotFound` is a caller bug, not a user-facing condition: this use
/// case only runs after the primary credential check has already resolved
/// the account.
#[derive(Debug, Error)]
pub enum InitiateTwoFactorError {
    #[error("Account not found for two-factor initiation")]
    AccountNotFound,
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("Failed to send verification code: {0}")]
    NotificationError(String),
}

/// Initiate two-factor use case - issues a one-time code and dispatches it.
pub struct InitiateTwoFactorUseCase<'a, C, O, N>
where
    C: CredentialStore,
    O: OtpStore,
    N: NotificationGateway,
{
    credential_store: &'a C,
    otp_store: &'a O,
    notification_gateway: &'a N,
    otp_ttl: Duration,
}

impl<'a, C, O, N> InitiateTwoFactorUseCase<'a, C, O, N>
where
    C: CredentialStore,
    O: OtpStore,
    N: NotificationGateway,
{
    pub fn new(
        credential_store: &'a C,
        otp_store: &'a O,
        notification_gateway: &'a N,
        otp_ttl: Duration,
    ) -> Self {
        Self {
            credential_store,
            otp_store,
            notification_gateway,
            otp_ttl,
        }
    }

    /// Execute the initiate two-factor use case
    ///
    /// Only the code's hash reaches the store; the plaintext goes out
    /// through the notification gateway and is then dropped. The returned
    /// request id is a fresh UUID with no relationship to the account id.
    #[tracing::instrument(name = "InitiateTwoFactorUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        account_id: AccountId,
    ) -> Result<OtpRequestId, InitiateTwoFactorError> {
        let account = self
            .credential_store
            .find_by_id(account_id)
            .await?
            .ok_or(InitiateTwoFactorError::AccountNotFound)?;

        let code = OtpCode::new();
        let request = LoginOtpRequest::new(account_id, &code, Utc::now() + self.otp_ttl);
        let request_id = request.id;

        self.otp_store.create(request).await?;

        self.notification_gateway
            .send_two_factor_code(account.email(), &code)
            .await
            .map_err(InitiateTwoFactorError::NotificationError)?;

        Ok(request_id)
    }
}
