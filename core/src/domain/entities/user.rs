//! User entity representing a registered MiniCommerce account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::UserName;

/// Authorization role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, unique across users
    pub email: String,

    /// Password hash produced by the configured `PasswordHasher`
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub name: UserName,

    pub role: Role,

    /// Relative path of an uploaded profile picture
    pub profile_picture_path: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the default role
    pub fn new(
        email: String,
        password_hash: String,
        name: UserName,
        profile_picture_path: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role: Role::User,
            profile_picture_path,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn change_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "ada@example.com".to_string(),
            "hashed".to_string(),
            UserName::new("Ada", "Lovelace").unwrap(),
            None,
        )
    }

    #[test]
    fn test_new_user_creation() {
        let user = sample_user();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "User");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "User");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_change_password_hash() {
        let mut user = sample_user();
        user.change_password_hash("new-hash".to_string());
        assert_eq!(user.password_hash, "new-hash");
        assert!(user.updated_at >= user.created_at);
    }
}
