use sqlx::{Pool, Postgres, Row};

use caregate_core::{AccountId, ProfileStore, ProfileStoreError, UserProfile};

/// Profile store backed by a `profiles` table:
///
/// ```sql
/// CREATE TABLE profiles (
///     id         TEXT PRIMARY KEY REFERENCES accounts (id),
///     first_name TEXT NOT NULL,
///     last_name  TEXT NOT NULL
/// );
/// ```
pub struct PostgresProfileStore {
    pool: sqlx::PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresProfileStore { pool }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PostgresProfileStore {
    #[tracing::instrument(name = "Adding profile to PostgreSQL", skip_all)]
    async fn create(&self, profile: UserProfile) -> Result<(), ProfileStoreError> {
        sqlx::query(
            r#"
                INSERT INTO profiles (id, first_name, last_name)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(profile.id.to_string())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return ProfileStoreError::ProfileAlreadyExists;
                }
            }
            ProfileStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving profile from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, first_name, last_name
                FROM profiles
                WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| ProfileStoreError::UnexpectedError(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| ProfileStoreError::UnexpectedError(e.to_string()))?;

        Ok(Some(UserProfile::new(id, first_name, last_name)))
    }
}
