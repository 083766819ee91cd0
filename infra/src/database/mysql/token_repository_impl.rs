//! MySQL implementation of the TokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mc_core::domain::entities::token::RefreshToken;
use mc_core::errors::{AuthError, DomainError};
use mc_core::repositories::TokenRepository;

use super::{is_unique_violation, storage_error};

const CONSUME_PRESENTED_TOKEN: &str = "UPDATE refresh_tokens SET is_revoked = TRUE \
     WHERE token = ? AND user_id = ? AND is_revoked = FALSE AND expires_at > ?";

const SELECT_COLUMNS: &str = "SELECT id, token, user_id, expires_at, is_revoked, created_at FROM refresh_tokens";

/// MySQL implementation of TokenRepository
///
/// Token values are stored as issued; the unique key on `token` rejects
/// duplicates.
#[derive(Clone)]
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| storage_error("Failed to get user_id", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("Invalid token UUID: {}", e)))?,
            token: row
                .try_get("token")
                .map_err(|e| storage_error("Failed to get token", e))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::storage(format!("Invalid user UUID: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| storage_error("Failed to get expires_at", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| storage_error("Failed to get is_revoked", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| storage_error("Failed to get created_at", e))?,
        })
    }

    fn insert_error(e: sqlx::Error) -> DomainError {
        if is_unique_violation(&e) {
            DomainError::storage("Duplicate refresh token")
        } else {
            storage_error("Failed to save refresh token", e)
        }
    }
}

const INSERT_TOKEN: &str = r#"
    INSERT INTO refresh_tokens (id, token, user_id, expires_at, is_revoked, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

const REVOKE_USER_TOKENS: &str = r#"
    UPDATE refresh_tokens
    SET is_revoked = TRUE
    WHERE user_id = ? AND is_revoked = FALSE
"#;

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        sqlx::query(INSERT_TOKEN)
            .bind(token.id.to_string())
            .bind(&token.token)
            .bind(token.user_id.to_string())
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(Self::insert_error)?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!("{} WHERE token = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_valid_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let query = format!(
            "{} WHERE user_id = ? AND is_revoked = FALSE AND expires_at > ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query(REVOKE_USER_TOKENS)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to revoke user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn rotate_user_tokens(
        &self,
        presented: Option<&str>,
        token: RefreshToken,
    ) -> Result<RefreshToken, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        // Owner row lock serializes concurrent rotations for the same user
        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(token.user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to lock token owner", e))?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if let Some(presented) = presented {
            let consumed = sqlx::query(CONSUME_PRESENTED_TOKEN)
                .bind(presented)
                .bind(token.user_id.to_string())
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(|e| storage_error("Failed to consume refresh token", e))?;

            // Dropping `tx` rolls back
            if consumed.rows_affected() == 0 {
                tracing::warn!(user_id = %token.user_id, "Refresh token already consumed");
                return Err(AuthError::TokenExpiredOrRevoked.into());
            }
        }

        let revoked = sqlx::query(REVOKE_USER_TOKENS)
            .bind(token.user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to revoke user tokens", e))?;

        sqlx::query(INSERT_TOKEN)
            .bind(token.id.to_string())
            .bind(&token.token)
            .bind(token.user_id.to_string())
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .bind(token.created_at)
            .execute(&mut *tx)
            .await
            .map_err(Self::insert_error)?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit token rotation", e))?;

        tracing::debug!(
            user_id = %token.user_id,
            revoked = revoked.rows_affected(),
            "Rotated refresh tokens"
        );

        Ok(token)
    }
}
