//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mc_core::domain::entities::user::{Role, User};
use mc_core::domain::value_objects::UserName;
use mc_core::errors::DomainError;
use mc_core::repositories::UserRepository;

use super::{is_unique_violation, storage_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, role,
           profile_picture_path, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("Failed to get id", e))?;
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| storage_error("Failed to get first_name", e))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| storage_error("Failed to get last_name", e))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| storage_error("Failed to get role", e))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("Invalid UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| storage_error("Failed to get email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| storage_error("Failed to get password_hash", e))?,
            name: UserName::new(&first_name, &last_name)?,
            role: role.parse::<Role>().map_err(DomainError::storage)?,
            profile_picture_path: row
                .try_get("profile_picture_path")
                .map_err(|e| storage_error("Failed to get profile_picture_path", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| storage_error("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| storage_error("Failed to get updated_at", e))?,
        })
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: String,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE {} LIMIT 1", SELECT_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to load user", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ?", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("id = ?", id.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, first_name, last_name, role,
                profile_picture_path, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.name.first_name())
            .bind(user.name.last_name())
            .bind(user.role.as_str())
            .bind(&user.profile_picture_path)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::BusinessRule {
                        message: "Email already registered".to_string(),
                    }
                } else {
                    storage_error("Failed to create user", e)
                }
            })?;

        tracing::debug!(user_id = %user.id, "User row inserted");

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, password_hash = ?, first_name = ?, last_name = ?,
                role = ?, profile_picture_path = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.name.first_name())
            .bind(user.name.last_name())
            .bind(user.role.as_str())
            .bind(&user.profile_picture_path)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }
}
