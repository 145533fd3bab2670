use chrono::Utc;

use caregate_core::{CredentialStore, OtpCode, OtpRequestId, OtpStore, TokenService};

use crate::auth_result::{AuthFailure, AuthResult};

/// Complete two-factor use case - resolves a one-time code against its
/// stored challenge.
///
/// The challenge is consumed on the first resolution attempt, whatever the
/// outcome: success, expiry and mismatch all leave the request id dead, so a
/// wrong guess cannot be retried and a used id cannot be replayed.
pub struct CompleteTwoFactorUseCase<'a, C, O, K>
where
    C: CredentialStore,
    O: OtpStore,
    K: TokenService,
{
    credential_store: &'a C,
    otp_store: &'a O,
    token_service: &'a K,
}

impl<'a, C, O, K> CompleteTwoFactorUseCase<'a, C, O, K>
where
    C: CredentialStore,
    O: OtpStore,
    K: TokenService,
{
    pub fn new(credential_store: &'a C, otp_store: &'a O, token_service: &'a K) -> Self {
        Self {
            credential_store,
            otp_store,
            token_service,
        }
    }

    /// Execute the complete two-factor use case
    ///
    /// `take` removes the record before any decision is made, so two
    /// concurrent attempts for the same request id cannot both proceed. On a
    /// match, both an access and a refresh token are minted.
    #[tracing::instrument(name = "CompleteTwoFactorUseCase::execute", skip(self, code))]
    pub async fn execute(&self, request_id: OtpRequestId, code: &OtpCode) -> AuthResult {
        let request = match self.otp_store.take(request_id).await {
            Ok(Some(request)) => request,
            Ok(None) => return AuthResult::failed(AuthFailure::InvalidRequest),
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        };

        if request.is_expired(Utc::now()) {
            return AuthResult::failed(AuthFailure::Expired);
        }

        if !request.code_hash.matches(code) {
            return AuthResult::failed(AuthFailure::InvalidCode);
        }

        let account = match self.credential_store.find_by_id(request.account_id).await {
            Ok(Some(account)) => account,
            Ok(None) => return AuthResult::failed(AuthFailure::UserNotFound),
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        };

        let access = match self.token_service.generate_access_token(&account) {
            Ok(token) => token,
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        };
        match self.token_service.generate_refresh_token(&account) {
            Ok(refresh) => AuthResult::succeeded_with_refresh(access, refresh),
            Err(e) => AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }
    }
}
