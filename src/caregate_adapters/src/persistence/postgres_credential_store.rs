use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, Row, postgres::PgRow};

use caregate_core::{
    Account, AccountId, CredentialStore, CredentialStoreError, Email, Password, Role,
};

use super::password_hashing::{compute_password_hash, policy_violations, verify_password_hash};

/// Credential store backed by an `accounts` table:
///
/// ```sql
/// CREATE TABLE accounts (
///     id            TEXT PRIMARY KEY,
///     email         TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     roles         TEXT[] NOT NULL
/// );
/// ```
pub struct PostgresCredentialStore {
    pool: sqlx::PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, roles
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        row.map(account_from_row).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, email, roles
                FROM accounts
                WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        row.map(account_from_row).transpose()
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
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

        let roles: Vec<String> = account
            .roles()
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
                INSERT INTO accounts (id, email, password_hash, roles)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.id().to_string())
        .bind(account.email().as_ref().expose_secret())
        .bind(password_hash.expose_secret())
        .bind(&roles)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::AccountAlreadyExists;
                }
            }
            CredentialStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Validating credentials in PostgreSQL", skip_all)]
    async fn check_password(
        &self,
        id: AccountId,
        password: &Password,
    ) -> Result<bool, CredentialStoreError> {
        let row = sqlx::query(
            r#"
                SELECT password_hash
                FROM accounts
                WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(CredentialStoreError::AccountNotFound);
        };
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(CredentialStoreError::UnexpectedError)
    }
}

fn account_from_row(row: PgRow) -> Result<Account, CredentialStoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
    let roles: Vec<String> = row
        .try_get("roles")
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

    let id = id
        .parse::<AccountId>()
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
    let email = Email::try_from(Secret::from(email))
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
    let roles = roles
        .iter()
        .map(|role| role.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

    Ok(Account::new(id, email, roles))
}
