use caregate_core::{
    Account, AccountId, CredentialStore, CredentialStoreError, Email, Password, ProfileStore,
    Role, TokenService, UserProfile,
};

use crate::auth_result::{AuthFailure, AuthResult};

/// Validated registration input.
#[derive(Debug)]
pub struct RegisterRequest {
    pub email: Email,
    pub password: Password,
    pub confirm_password: Password,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Register use case - creates an account with its profile and logs the
/// user in.
pub struct RegisterUseCase<'a, C, P, K>
where
    C: CredentialStore,
    P: ProfileStore,
    K: TokenService,
{
    credential_store: &'a C,
    profile_store: &'a P,
    token_service: &'a K,
}

impl<'a, C, P, K> RegisterUseCase<'a, C, P, K>
where
    C: CredentialStore,
    P: ProfileStore,
    K: TokenService,
{
    pub fn new(credential_store: &'a C, profile_store: &'a P, token_service: &'a K) -> Self {
        Self {
            credential_store,
            profile_store,
            token_service,
        }
    }

    /// Execute the register use case
    ///
    /// Duplicate emails are rejected before any write. On success the
    /// account and its profile share one id and an access token is returned -
    /// registration is an implicit login.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, request: RegisterRequest) -> AuthResult {
        if request.password != request.confirm_password {
            return AuthResult::failed(AuthFailure::WeakCredential(vec![
                "Password and confirmation do not match".to_string(),
            ]));
        }

        match self.credential_store.find_by_email(&request.email).await {
            Ok(Some(_)) => return AuthResult::failed(AuthFailure::AlreadyExists),
            Ok(None) => {}
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }

        let account = Account::new(AccountId::new(), request.email, [request.role]);
        match self
            .credential_store
            .create(account.clone(), request.password)
            .await
        {
            Ok(()) => {}
            Err(CredentialStoreError::RejectedPassword(reasons)) => {
                return AuthResult::failed(AuthFailure::WeakCredential(reasons));
            }
            Err(CredentialStoreError::AccountAlreadyExists) => {
                return AuthResult::failed(AuthFailure::AlreadyExists);
            }
            Err(e) => return AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }

        let profile = UserProfile::new(account.id(), request.first_name, request.last_name);
        if let Err(e) = self.profile_store.create(profile).await {
            // The account exists but its profile does not. Keep that state
            // loud and repairable instead of returning a token for it.
            tracing::error!(
                account_id = %account.id(),
                error = %e,
                "account created without profile"
            );
            return AuthResult::failed(AuthFailure::Unexpected(e.to_string()));
        }

        match self.token_service.generate_access_token(&account) {
            Ok(token) => AuthResult::succeeded(token),
            Err(e) => AuthResult::failed(AuthFailure::Unexpected(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockCredentialStore, MockProfileStore, MockTokenService, email, password,
    };

    fn request(email_str: &str) -> RegisterRequest {
        RegisterRequest {
            email: email(email_str),
            password: password("s3curePassword"),
            confirm_password: password("s3curePassword"),
            first_name: "Alice".to_string(),
            last_name: "Nguyen".to_string(),
            role: Role::Patient,
        }
    }

    #[tokio::test]
    async fn test_register_creates_account_and_profile_with_same_id() {
        let credential_store = MockCredentialStore::new();
        let profile_store = MockProfileStore::new();
        let token_service = MockTokenService::new();
        let use_case = RegisterUseCase::new(&credential_store, &profile_store, &token_service);

        let result = use_case.execute(request("alice@example.com")).await;

        assert!(result.is_success());
        assert!(result.token.is_some());
        assert!(result.refresh_token.is_none());

        let account = credential_store
            .get_by_email(&email("alice@example.com"))
            .await
            .unwrap();
        let profile = profile_store.get(account.id()).await.unwrap();
        assert_eq!(profile.id, account.id());
        assert_eq!(profile.first_name, "Alice");
        assert_eq!(profile.last_name, "Nguyen");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email_without_profile_write() {
        let credential_store = MockCredentialStore::new();
        let profile_store = MockProfileStore::new();
        let token_service = MockTokenService::new();
        let use_case = RegisterUseCase::new(&credential_store, &profile_store, &token_service);

        let first = use_case.execute(request("alice@example.com")).await;
        assert!(first.is_success());

        let second = use_case.execute(request("alice@example.com")).await;
        assert_eq!(second.failure, Some(AuthFailure::AlreadyExists));
        assert!(second.token.is_none());
        assert_eq!(profile_store.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_surfaces_store_password_policy_verbatim() {
        let credential_store =
            MockCredentialStore::new().with_rejected_password("s3curePassword", "needs a symbol");
        let profile_store = MockProfileStore::new();
        let token_service = MockTokenService::new();
        let use_case = RegisterUseCase::new(&credential_store, &profile_store, &token_service);

        let result = use_case.execute(request("alice@example.com")).await;

        assert_eq!(
            result.failure,
            Some(AuthFailure::WeakCredential(Vec::new()))
        );
        assert_eq!(result.errors, vec!["needs a symbol"]);
        assert_eq!(profile_store.len().await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_confirmation() {
        let credential_store = MockCredentialStore::new();
        let profile_store = MockProfileStore::new();
        let token_service = MockTokenService::new();
        let use_case = RegisterUseCase::new(&credential_store, &profile_store, &token_service);

        let mut req = request("alice@example.com");
        req.confirm_password = password("differentPassword");
        let result = use_case.execute(req).await;

        assert!(!result.is_success());
        assert!(credential_store
            .get_by_email(&email("alice@example.com"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_register_reports_profile_write_failure() {
        let credential_store = MockCredentialStore::new();
        let profile_store = MockProfileStore::failing();
        let token_service = MockTokenService::new();
        let use_case = RegisterUseCase::new(&credential_store, &profile_store, &token_service);

        let result = use_case.execute(request("alice@example.com")).await;

        assert_eq!(
            result.failure,
            Some(AuthFailure::Unexpected(String::new()))
        );
        assert!(result.token.is_none());
    }
}
