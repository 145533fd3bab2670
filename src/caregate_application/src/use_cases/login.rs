use caregate_core::{CredentialStore, CredentialStoreError, Email, Password, TokenService};

use crate::auth_result::{AuthFailure, AuthResult};

/// Login use case - password authentication with a single, uniform failure
/// message.
pub struct LoginUseCase<'a, C, K>
where
    C: CredentialStore,
    K: TokenService,
{
    credential_store: &'a C,
    token_service: &'a K,
}

impl<'a, C, K> LoginUseCase<'a, C, K>
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

    /// Execute the login use case
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` result - the response must not reveal which one
    /// it was. Success mints an access token only; refresh tokens come from
    /// the two-factor handshake.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email, password: &Password) -> AuthResult {
        let account = match self.credential_store.find_by_email(email).await {
            Ok(Some(account)) => account,
            Ok(None) => return AuthResult::failed(AuthFailure::InvalidCredentials),
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        };

        match self.credential_store.check_password(account.id(), password).await {
            Ok(true) => {}
            Ok(false) => return AuthResult::failed(AuthFailure::InvalidCredentials),
            Err(CredentialStoreError::IncorrectPassword)
            | Err(CredentialStoreError::AccountNotFound) => {
                return AuthResult::failed(AuthFailure::InvalidCredentials);
            }
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }

        match self.token_service.generate_access_token(&account) {
            Ok(token) => AuthResult::succeeded(token),
            Err(e) => AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }
    }
}
