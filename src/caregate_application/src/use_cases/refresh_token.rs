use caregate_core::{CredentialStore, TokenService};

use crate::auth_result::{AuthFailure, AuthResult};

/// Refresh token use case - exchanges a valid refresh token for a fresh
/// access token and a rotated refresh token.
pub struct RefreshTokenUseCase<'a, C, K>
where
    C: CredentialStore,
    K: TokenService,
{
    credential_store: &'a C,
    token_service: &'a K,
}

impl<'a, C, K> RefreshTokenUseCase<'a, C, K>
where
    C: CredentialStore,
    K: TokenService,
{
    pub fn new(credential_store: &'a C, token_service: &'a K) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    /// Execute the refresh use case
    ///
    /// The refresh token must pass its own validation (signature, expiry and
    /// the refresh claim set); an access token is not accepted here. The
    /// subject must still resolve to an account. Refresh tokens rotate: the
    /// old one is superseded by the returned one.
    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> AuthResult {
        let Some(subject) = self.token_service.validate_refresh_token(refresh_token) else {
            return AuthResult::failed(AuthFailure::InvalidToken);
        };

        let account = match self.credential_store.find_by_id(subject).await {
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
