use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{CredentialRepository, StorageError};
use quiz_core::model::Credential;

use super::SqliteRepository;

#[async_trait]
impl CredentialRepository for SqliteRepository {
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError> {
        let row = sqlx::query("SELECT token, username FROM credentials WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let token: String = row
            .try_get("token")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(Credential::new(token, username)))
    }

    async fn save_credential(
        &self,
        credential: &Credential,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO credentials (id, token, username, saved_at)
            VALUES (1, ?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                username = excluded.username,
                saved_at = excluded.saved_at
            ",
        )
        .bind(credential.token())
        .bind(credential.username())
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn clear_credential(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM credentials")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
