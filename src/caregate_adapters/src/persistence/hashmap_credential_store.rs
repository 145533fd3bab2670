use std::collections::HashMap;
use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::RwLock;

use caregate_core::{Account, AccountId, CredentialStore, CredentialStoreError, Email, Password};

use super::password_hashing::{compute_password_hash, policy_violations, verify_password_hash};

struct StoredAccount {
    account: Account,
    password_hash: Secret<String>,
}

/// In-memory credential store for tests and local runs. Hashes passwords
/// with the same argon2 parameters as the PostgreSQL store so the two are
/// interchangeable behind the port.
#[derive(Clone, Default)]
pub struct HashMapCredentialStore {
    accounts: Arc<RwLock<HashMap<AccountId, StoredAccount>>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|stored| stored.account.email() == email)
            .map(|stored| stored.account.clone()))
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, CredentialStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).map(|stored| stored.account.clone()))
    }

    #[tracing::instrument(name = "Adding account to in-memory store", skip_all)]
    async fn create(
        &self,
        account: Account,
        password: Password,
    ) -> Result<(), CredentialStoreError> {
        let reasons = policy_violations(&password);
        if !reasons.is_empty() {
            return Err(CredentialStoreError::RejectedPassword(reasons));
        }

        let password_hash = compute_password_hash(password)
            .await
            .map_err(CredentialStoreError::UnexpectedError)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id())
            || accounts
                .values()
                .any(|stored| stored.account.email() == account.email())
        {
            return Err(CredentialStoreError::AccountAlreadyExists);
        }

        accounts.insert(
            account.id(),
            StoredAccount {
                account,
                password_hash,
            },
        );
        Ok(())
    }

    #[tracing::instrument(name = "Validating credentials in in-memory store", skip_all)]
    async fn check_password(
        &self,
        id: AccountId,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let password_hash = {
            let accounts = self.accounts.read().await;
            accounts
                .get(&id)
                .ok_or(CredentialStoreError::AccountNotFound)?
                .password_hash
                .clone()
        };

        verify_password_hash(password_hash, password.clone())
            .await
            .map_err(CredentialStoreError::UnexpectedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caregate_core::Role;
    use secrecy::Secret;

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_string())).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    fn account(raw_email: &str) -> Account {
        Account::new(AccountId::new(), email(raw_email), [Role::Patient])
    }

    #[tokio::test]
    async fn test_create_then_check_password() {
        let store = HashMapCredentialStore::new();
        let account = account("alice@example.com");
        let id = account.id();

        store
            .create(account, password("s3curePassword"))
            .await
            .unwrap();

        assert!(store.check_password(id, &password("s3curePassword")).await.unwrap());
        assert!(!store.check_password(id, &password("wr0ngPassword")).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = HashMapCredentialStore::new();
        store
            .create(account("alice@example.com"), password("s3curePassword"))
            .await
            .unwrap();

        let result = store
            .create(account("alice@example.com"), password("s3curePassword"))
            .await;

        assert_eq!(result, Err(CredentialStoreError::AccountAlreadyExists));
    }

    #[tokio::test]
    async fn test_weak_password_reports_reasons() {
        let store = HashMapCredentialStore::new();
        let result = store
            .create(account("alice@example.com"), password("lettersonly"))
            .await;

        match result {
            Err(CredentialStoreError::RejectedPassword(reasons)) => {
                assert_eq!(reasons.len(), 1);
            }
            other => panic!("expected RejectedPassword, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_email_matches_normalized_address() {
        let store = HashMapCredentialStore::new();
        store
            .create(account("alice@example.com"), password("s3curePassword"))
            .await
            .unwrap();

        let found = store
            .find_by_email(&email("ALICE@example.com"))
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = store.find_by_email(&email("bob@example.com")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_check_password_for_unknown_account() {
        let store = HashMapCredentialStore::new();
        let result = store
            .check_password(AccountId::new(), &password("s3curePassword"))
            .await;
        assert_eq!(result, Err(CredentialStoreError::AccountNotFound));
    }
}
