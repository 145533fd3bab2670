//! In-memory fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use caregate_core::{
    Account, AccountId, CredentialStore, CredentialStoreError, Email, LoginOtpRequest,
    NotificationGateway, OtpCode, OtpRequestId, OtpStore, OtpStoreError, Password, Principal,
    ProfileStore, ProfileStoreError, Role, TokenService, TokenServiceError, UserProfile,
};

pub fn email(s: &str) -> Email {
    Email::try_from(Secret::from(s.to_string())).unwrap()
}

pub fn password(s: &str) -> Password {
    Password::try_from(Secret::from(s.to_string())).unwrap()
}

#[derive(Clone, Default)]
pub struct MockCredentialStore {
    accounts: Arc<RwLock<HashMap<AccountId, (Account, String)>>>,
    rejections: HashMap<String, String>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rejected_password(mut self, password: &str, reason: &str) -> Self {
        self.rejections
            .insert(password.to_string(), reason.to_string());
        self
    }

    pub async fn insert(&self, account: Account, password: &Password) {
        self.accounts.write().await.insert(
            account.id(),
            (account, password.as_ref().expose_secret().clone()),
        );
    }

    pub async fn get_by_email(&self, email: &Email) -> Option<Account> {
        self.accounts
            .read()
            .await
            .values()
            .find(|(account, _)| account.email() == email)
            .map(|(account, _)| account.clone())
    }
}

#[async_trait::async_trait]
impl CredentialStore for MockCredentialStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError> {
        Ok(self.get_by_email(email).await)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, CredentialStoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .get(&id)
            .map(|(account, _)| account.clone()))
    }

    async fn create(
        &self,
        account: Account,
        password: Password,
    ) -> Result<(), CredentialStoreError> {
        let plaintext = password.as_ref().expose_secret().clone();
        if let Some(reason) = self.rejections.get(&plaintext) {
            return Err(CredentialStoreError::RejectedPassword(vec![reason.clone()]));
        }
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|(existing, _)| existing.email() == account.email())
        {
            return Err(CredentialStoreError::AccountAlreadyExists);
        }
        accounts.insert(account.id(), (account, plaintext));
        Ok(())
    }

    async fn check_password(
        &self,
        id: AccountId,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let accounts = self.accounts.read().await;
        let (_, stored) = accounts
            .get(&id)
            .ok_or(CredentialStoreError::AccountNotFound)?;
        Ok(stored == password.as_ref().expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct MockProfileStore {
    profiles: Arc<RwLock<HashMap<AccountId, UserProfile>>>,
    failing: bool,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn get(&self, id: AccountId) -> Option<UserProfile> {
        self.profiles.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait::async_trait]
impl ProfileStore for MockProfileStore {
    async fn create(&self, profile: UserProfile) -> Result<(), ProfileStoreError> {
        if self.failing {
            return Err(ProfileStoreError::UnexpectedError(
                "profile store unavailable".to_string(),
            ));
        }
        self.profiles.write().await.insert(profile.id, profile);
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserProfile>, ProfileStoreError> {
        Ok(self.get(id).await)
    }
}

#[derive(Clone, Default)]
pub struct MockOtpStore {
    requests: Arc<RwLock<HashMap<OtpRequestId, LoginOtpRequest>>>,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait::async_trait]
impl OtpStore for MockOtpStore {
    async fn create(&self, request: LoginOtpRequest) -> Result<(), OtpStoreError> {
        self.requests.write().await.insert(request.id, request);
        Ok(())
    }

    async fn take(&self, id: OtpRequestId) -> Result<Option<LoginOtpRequest>, OtpStoreError> {
        Ok(self.requests.write().await.remove(&id))
    }
}

#[derive(Clone, Default)]
pub struct MockNotificationGateway {
    sent: Arc<RwLock<Vec<(Email, OtpCode)>>>,
}

impl MockNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_code(&self) -> Option<OtpCode> {
        self.sent.read().await.last().map(|(_, code)| code.clone())
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait::async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn send_two_factor_code(&self, recipient: &Email, code: &OtpCode) -> Result<(), String> {
        self.sent
            .write()
            .await
            .push((recipient.clone(), code.clone()));
        Ok(())
    }
}

/// Token fake with a transparent format so tests can round-trip principals
/// without real signatures.
#[derive(Clone, Default)]
pub struct MockTokenService;

impl MockTokenService {
    pub fn new() -> Self {
        Self
    }
}

impl TokenService for MockTokenService {
    fn generate_access_token(&self, account: &Account) -> Result<String, TokenServiceError> {
        let mut roles: Vec<&str> = account.roles().iter().map(|r| r.as_str()).collect();
        roles.sort_unstable();
        Ok(format!("access|{}|{}", account.id(), roles.join(",")))
    }

    fn generate_refresh_token(&self, account: &Account) -> Result<String, TokenServiceError> {
        Ok(format!("refresh|{}", account.id()))
    }

    fn validate_access_token(&self, token: &str) -> Option<Principal> {
        let mut parts = token.splitn(3, '|');
        if parts.next() != Some("access") {
            return None;
        }
        let subject: AccountId = parts.next()?.parse().ok()?;
        let roles: Vec<Role> = parts
            .next()?
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse())
            .collect::<Result<_, _>>()
            .ok()?;
        Some(Principal::new(subject, roles))
    }

    fn validate_refresh_token(&self, token: &str) -> Option<AccountId> {
        let mut parts = token.splitn(2, '|');
        if parts.next() != Some("refresh") {
            return None;
        }
        parts.next()?.parse().ok()
    }
}
